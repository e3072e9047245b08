// Telemetry probes over OS data sources (sysinfo + /proc + /sys)

mod linux;

use crate::config::SamplingConfig;
use crate::models::*;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Disks, Networks, System};
use thiserror::Error;
use tracing::instrument;

/// Failure taxonomy for best-effort data sources. None of these abort a
/// report; the formatter renders them inline and moves on.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The OS refused access; the report prints the fixed placeholder line.
    #[error("{0} permission not granted")]
    PermissionDenied(&'static str),
    /// Missing hardware or an absent data source.
    #[error("{0}")]
    Unavailable(String),
    #[error("{what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub struct TelemetryProbes {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    cpu_probe_delay: Duration,
    data_mount: String,
}

impl TelemetryProbes {
    pub fn new(sampling: &SamplingConfig) -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
            cpu_probe_delay: Duration::from_millis(sampling.cpu_probe_delay_ms),
            data_mount: sampling.data_mount.clone(),
        }
    }

    /// Two stat readings separated by the probe delay, differenced into a
    /// usage percentage. `usage_percent` stays `None` when the stat source
    /// is unreadable; an empty window reads as 0%.
    #[instrument(skip(self), fields(probe = "cpu"))]
    pub async fn cpu_stats(&self) -> anyhow::Result<CpuStats> {
        let first = tokio::task::spawn_blocking(linux::read_cpu_ticks)
            .await
            .map_err(|e| anyhow::anyhow!("cpu probe join: {}", e))?;
        tokio::time::sleep(self.cpu_probe_delay).await;
        let second = tokio::task::spawn_blocking(linux::read_cpu_ticks)
            .await
            .map_err(|e| anyhow::anyhow!("cpu probe join: {}", e))?;

        let usage_percent = match (first, second) {
            (Some(a), Some(b)) => Some(a.usage_since(&b)),
            _ => None,
        };

        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let model = linux::read_cpu_model()
                .or_else(|| {
                    sys.cpus()
                        .first()
                        .map(|c| c.name().to_string())
                        .filter(|s| !s.is_empty() && s != "cpu0")
                })
                .unwrap_or_else(|| "Unknown".into());
            Ok(CpuStats {
                model,
                logical_cores: sys.cpus().len() as u32,
                usage_percent,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("cpu probe join: {}", e))?
    }

    #[instrument(skip(self), fields(probe = "memory"))]
    pub async fn memory_snapshot(&self) -> anyhow::Result<MemorySnapshot> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            Ok(MemorySnapshot {
                total_bytes: sys.total_memory(),
                available_bytes: sys.available_memory(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("memory probe join: {}", e))?
    }

    /// Totals for the configured data mount; falls back to the longest
    /// mount-point prefix when no exact match exists.
    #[instrument(skip(self), fields(probe = "storage"))]
    pub async fn storage_snapshot(&self) -> anyhow::Result<StorageSnapshot> {
        let disks = self.disks.clone();
        let data_mount = self.data_mount.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);
            let disk = disks_guard
                .list()
                .iter()
                .filter(|d| data_mount.starts_with(&*d.mount_point().to_string_lossy()))
                .max_by_key(|d| d.mount_point().as_os_str().len())
                .ok_or_else(|| anyhow::anyhow!("no disk mounted under {}", data_mount))?;
            Ok(StorageSnapshot {
                mount: disk.mount_point().to_string_lossy().into_owned(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("storage probe join: {}", e))?
    }

    #[instrument(skip(self), fields(probe = "battery"))]
    pub async fn battery_state(&self) -> Result<BatteryState, ProbeError> {
        let reading = tokio::task::spawn_blocking(linux::read_battery_reading)
            .await
            .map_err(|e| ProbeError::Unavailable(format!("battery probe join: {}", e)))??;
        Ok(BatteryState::decode(&reading))
    }

    /// Static host identity for the report's build section.
    #[instrument(skip(self), fields(probe = "device"))]
    pub async fn device_info(&self) -> anyhow::Result<DeviceInfo> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let (vendor, model) = linux::read_dmi_identity();
            let cpu_model = linux::read_cpu_model()
                .or_else(|| {
                    sys.cpus()
                        .first()
                        .map(|c| c.name().to_string())
                        .filter(|s| !s.is_empty() && s != "cpu0")
                })
                .unwrap_or_else(|| "Unknown".into());
            Ok(DeviceInfo {
                hostname: System::host_name().unwrap_or_default(),
                os_name: linux::read_os_name()
                    .or_else(System::name)
                    .unwrap_or_else(|| std::env::consts::OS.into()),
                os_version: System::os_version().unwrap_or_default(),
                kernel_version: System::kernel_version().unwrap_or_default(),
                arch: std::env::consts::ARCH.into(),
                vendor: vendor.unwrap_or_else(|| "Unknown".into()),
                model: model.unwrap_or_else(|| "Unknown".into()),
                cpu_model,
                uptime_secs: System::uptime(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("device probe join: {}", e))?
    }

    /// Raw cpuinfo text; the report logs it verbatim rather than a computed
    /// percentage.
    pub async fn cpuinfo_text(&self) -> Result<String, ProbeError> {
        tokio::task::spawn_blocking(linux::read_cpuinfo_raw)
            .await
            .map_err(|e| ProbeError::Unavailable(format!("cpuinfo probe join: {}", e)))?
            .map_err(|e| ProbeError::Io {
                what: "/proc/cpuinfo",
                source: e,
            })
    }

    #[instrument(skip(self), fields(probe = "sensors"))]
    pub async fn sensor_inventory(&self) -> Result<Vec<SensorInfo>, ProbeError> {
        tokio::task::spawn_blocking(linux::read_sensor_inventory)
            .await
            .map_err(|e| ProbeError::Unavailable(format!("sensor probe join: {}", e)))?
            .map_err(|e| ProbeError::Io {
                what: "hwmon inventory",
                source: e,
            })
    }

    #[instrument(skip(self), fields(probe = "wifi"))]
    pub async fn wifi_info(&self) -> Result<WifiInfo, ProbeError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let interface = linux::find_wireless_interface()
                .ok_or_else(|| ProbeError::Unavailable("no wireless interface".into()))?;
            let rssi_dbm = linux::read_wireless_rssi(&interface)?;
            let (ssid, bssid) = linux::read_wifi_association(&interface)?;
            let link_speed_mbps = linux::interface_speed_mbps(&interface);

            let ip_address = networks.lock().ok().and_then(|mut guard| {
                guard.refresh(true);
                guard
                    .list()
                    .iter()
                    .find(|(name, _)| **name == interface)
                    .and_then(|(_, data)| {
                        data.ip_networks()
                            .iter()
                            .find(|n| n.addr.is_ipv4())
                            .map(|n| n.addr.to_string())
                    })
            });

            Ok(WifiInfo {
                interface,
                ssid,
                bssid,
                ip_address,
                link_speed_mbps,
                rssi_dbm,
            })
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("wifi probe join: {}", e)))?
    }

    #[instrument(skip(self), fields(probe = "cellular"))]
    pub async fn cellular_info(&self) -> Result<CellularInfo, ProbeError> {
        tokio::task::spawn_blocking(linux::read_cellular_operator)
            .await
            .map_err(|e| ProbeError::Unavailable(format!("cellular probe join: {}", e)))?
    }
}

// Snapshot logger: gather every report section, render, persist to a
// timestamped file. Section failures degrade to inline diagnostics and are
// logged; only directory/file I/O can fail the write as a whole.

use crate::probes::TelemetryProbes;
use crate::report::{self, ReportInputs};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub struct SnapshotLogger {
    probes: Arc<TelemetryProbes>,
    log_dir: PathBuf,
}

impl SnapshotLogger {
    pub fn new(probes: Arc<TelemetryProbes>, log_dir: impl AsRef<Path>) -> Self {
        Self {
            probes,
            log_dir: log_dir.as_ref().to_path_buf(),
        }
    }

    /// Write one report, creating the log directory if absent.
    /// Returns the path of the written file.
    pub async fn write_snapshot(&self) -> anyhow::Result<PathBuf> {
        let inputs = self.gather().await;
        let now = Local::now();
        let body = report::render(now, &inputs);

        tokio::fs::create_dir_all(&self.log_dir).await?;
        let path = self.log_dir.join(report::file_name(now));
        tokio::fs::write(&path, body).await?;
        tracing::info!(path = %path.display(), "system info report written");
        Ok(path)
    }

    async fn gather(&self) -> ReportInputs {
        let device = self.probes.device_info().await.map_err(|e| {
            warn!(error = %e, section = "build", "report section source failed");
            e.to_string()
        });
        let cpuinfo = self.probes.cpuinfo_text().await.map_err(|e| {
            warn!(error = %e, section = "cpu", "report section source failed");
            e.to_string()
        });
        let memory = self.probes.memory_snapshot().await.map_err(|e| {
            warn!(error = %e, section = "memory", "report section source failed");
            e.to_string()
        });
        let storage = self.probes.storage_snapshot().await.map_err(|e| {
            warn!(error = %e, section = "storage", "report section source failed");
            e.to_string()
        });
        let battery = self.probes.battery_state().await.map_err(|e| {
            // Hosts without a battery are common; not worth a warning.
            tracing::debug!(error = %e, section = "battery", "report section source failed");
            e.to_string()
        });
        let sensors = self.probes.sensor_inventory().await.map_err(|e| {
            warn!(error = %e, section = "sensors", "report section source failed");
            e.to_string()
        });
        let wifi = self.probes.wifi_info().await.inspect_err(|e| {
            tracing::debug!(error = %e, section = "wifi", "report section source failed");
        });
        let cellular = self.probes.cellular_info().await.inspect_err(|e| {
            tracing::debug!(error = %e, section = "cellular", "report section source failed");
        });

        ReportInputs {
            device,
            cpuinfo,
            memory,
            storage,
            battery,
            sensors,
            wifi,
            cellular,
        }
    }
}

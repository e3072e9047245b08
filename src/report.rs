// Snapshot report assembly: gathered section inputs -> one text blob.
// Every section degrades to an inline diagnostic line; nothing here aborts
// the report.

use crate::models::{BatteryState, CellularInfo, DeviceInfo, MemorySnapshot, SensorInfo,
    StorageSnapshot, WifiInfo};
use crate::probes::ProbeError;
use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// Everything a report needs, gathered up front. Fallible sections carry
/// their failure message so rendering stays pure and deterministic.
pub struct ReportInputs {
    pub device: Result<DeviceInfo, String>,
    pub cpuinfo: Result<String, String>,
    pub memory: Result<MemorySnapshot, String>,
    pub storage: Result<StorageSnapshot, String>,
    pub battery: Result<BatteryState, String>,
    pub sensors: Result<Vec<SensorInfo>, String>,
    pub wifi: Result<WifiInfo, ProbeError>,
    pub cellular: Result<CellularInfo, ProbeError>,
}

/// Report file name for a generation instant: `SystemInfo_<ts>.txt`.
pub fn file_name(at: DateTime<Local>) -> String {
    format!("SystemInfo_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

pub fn render(generated_at: DateTime<Local>, inputs: &ReportInputs) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "System Info Dump at {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "====================");

    render_build_section(&mut out, &inputs.device);
    render_cpu_section(&mut out, &inputs.cpuinfo);
    render_memory_section(&mut out, &inputs.memory);
    render_storage_section(&mut out, &inputs.storage);
    render_battery_section(&mut out, &inputs.battery);
    render_sensor_section(&mut out, &inputs.sensors);
    render_connectivity_section(&mut out, &inputs.wifi, &inputs.cellular);

    out
}

fn render_build_section(out: &mut String, device: &Result<DeviceInfo, String>) {
    let _ = writeln!(out, "\n--- BUILD INFO ---");
    match device {
        Ok(d) => {
            let _ = writeln!(out, "Hostname: {}", d.hostname);
            let _ = writeln!(out, "OS: {}", d.os_name);
            let _ = writeln!(out, "OS Version: {}", d.os_version);
            let _ = writeln!(out, "Kernel: {}", d.kernel_version);
            let _ = writeln!(out, "Architecture: {}", d.arch);
            let _ = writeln!(out, "Vendor: {}", d.vendor);
            let _ = writeln!(out, "Model: {}", d.model);
            let _ = writeln!(out, "CPU Model: {}", d.cpu_model);
            let _ = writeln!(out, "Uptime: {}", format_uptime(d.uptime_secs));
        }
        Err(e) => {
            let _ = writeln!(out, "Could not read build identifiers: {}", e);
        }
    }
}

fn render_cpu_section(out: &mut String, cpuinfo: &Result<String, String>) {
    let _ = writeln!(out, "\n--- CPU INFO ---");
    match cpuinfo {
        Ok(text) => {
            let _ = writeln!(out, "{}", text.trim_end());
        }
        Err(e) => {
            let _ = writeln!(out, "Could not read /proc/cpuinfo: {}", e);
        }
    }
}

fn render_memory_section(out: &mut String, memory: &Result<MemorySnapshot, String>) {
    let _ = writeln!(out, "\n--- MEMORY (RAM) ---");
    match memory {
        Ok(m) => {
            let _ = writeln!(out, "Total Memory: {}", format_size(m.total_bytes));
            let _ = writeln!(out, "Available Memory: {}", format_size(m.available_bytes));
            let _ = writeln!(out, "Used Memory: {}", format_size(m.used_bytes()));
        }
        Err(e) => {
            let _ = writeln!(out, "Could not retrieve memory info: {}", e);
        }
    }
}

fn render_storage_section(out: &mut String, storage: &Result<StorageSnapshot, String>) {
    let _ = writeln!(out, "\n--- STORAGE ---");
    match storage {
        Ok(s) => {
            let _ = writeln!(out, "Mount: {}", s.mount);
            let _ = writeln!(out, "Total: {}", format_size(s.total_bytes));
            let _ = writeln!(out, "Used: {}", format_size(s.used_bytes()));
            let _ = writeln!(out, "Available: {}", format_size(s.available_bytes));
        }
        Err(e) => {
            let _ = writeln!(out, "Could not retrieve storage info: {}", e);
        }
    }
}

fn render_battery_section(out: &mut String, battery: &Result<BatteryState, String>) {
    let _ = writeln!(out, "\n--- BATTERY ---");
    match battery {
        Ok(b) => {
            match b.percent {
                Some(pct) => {
                    let _ = writeln!(out, "Level: {:.1}%", pct);
                }
                None => {
                    let _ = writeln!(out, "Level: Unknown");
                }
            }
            let _ = writeln!(out, "Status: {}", b.status);
            let _ = writeln!(out, "Health: {}", b.health);
            match b.temperature_celsius {
                Some(t) => {
                    let _ = writeln!(out, "Temperature: {:.1} \u{00b0}C", t);
                }
                None => {
                    let _ = writeln!(out, "Temperature: Unknown");
                }
            }
            match b.voltage_mv {
                Some(v) => {
                    let _ = writeln!(out, "Voltage: {} mV", v);
                }
                None => {
                    let _ = writeln!(out, "Voltage: Unknown");
                }
            }
            let _ = writeln!(
                out,
                "Technology: {}",
                b.technology.as_deref().unwrap_or("Unknown")
            );
        }
        Err(e) => {
            let _ = writeln!(out, "Could not retrieve battery info: {}", e);
        }
    }
}

fn render_sensor_section(out: &mut String, sensors: &Result<Vec<SensorInfo>, String>) {
    let _ = writeln!(out, "\n--- SENSORS ---");
    match sensors {
        Ok(list) if list.is_empty() => {
            let _ = writeln!(out, "No sensors found.");
        }
        Ok(list) => {
            for sensor in list {
                let _ = writeln!(
                    out,
                    "- {} (Device: {}, Type: {})",
                    sensor.name, sensor.device, sensor.kind
                );
            }
        }
        Err(e) => {
            let _ = writeln!(out, "Could not enumerate sensors: {}", e);
        }
    }
}

fn render_connectivity_section(
    out: &mut String,
    wifi: &Result<WifiInfo, ProbeError>,
    cellular: &Result<CellularInfo, ProbeError>,
) {
    let _ = writeln!(out, "\n--- CONNECTIVITY ---");
    let _ = writeln!(out, "-- Wi-Fi --");
    match wifi {
        Ok(w) => {
            let _ = writeln!(out, "Interface: {}", w.interface);
            let _ = writeln!(out, "SSID: {}", w.ssid.as_deref().unwrap_or("Unknown"));
            let _ = writeln!(out, "BSSID: {}", w.bssid.as_deref().unwrap_or("Unknown"));
            let _ = writeln!(
                out,
                "IP Address: {}",
                w.ip_address.as_deref().unwrap_or("Unknown")
            );
            match w.link_speed_mbps {
                Some(speed) => {
                    let _ = writeln!(out, "Link Speed: {} Mbps", speed);
                }
                None => {
                    let _ = writeln!(out, "Link Speed: Unknown");
                }
            }
            match w.rssi_dbm {
                Some(rssi) => {
                    let _ = writeln!(out, "RSSI: {} dBm", rssi);
                }
                None => {
                    let _ = writeln!(out, "RSSI: Unknown");
                }
            }
        }
        Err(e @ ProbeError::PermissionDenied(_)) => {
            let _ = writeln!(out, "{}.", e);
        }
        Err(e) => {
            let _ = writeln!(out, "Error getting Wi-Fi info: {}", e);
        }
    }

    let _ = writeln!(out, "\n-- Cellular --");
    match cellular {
        Ok(c) => {
            let _ = writeln!(out, "Network Operator: {}", c.operator);
        }
        Err(e @ ProbeError::PermissionDenied(_)) => {
            let _ = writeln!(out, "{}.", e);
        }
        Err(e) => {
            let _ = writeln!(out, "Error getting Cellular info: {}", e);
        }
    }
}

/// Human-readable byte count, 1024-based: KB below 1 MiB, MB below 1 GiB,
/// GB above.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes = bytes as f64;
    if bytes < MB {
        format!("{:.2} KB", bytes / KB)
    } else if bytes < GB {
        format!("{:.2} MB", bytes / MB)
    } else {
        format!("{:.2} GB", bytes / GB)
    }
}

pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

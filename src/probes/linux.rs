// Linux-specific helpers: /proc, /sys, /etc/os-release, DMI, power supply, hwmon.

use crate::models::{BatteryReading, CellularInfo, CpuTicks, SensorInfo};
use crate::probes::ProbeError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Read the aggregate cpu line from /proc/stat (Linux).
pub(super) fn read_cpu_ticks() -> Option<CpuTicks> {
    #[cfg(target_os = "linux")]
    {
        let content = fs::read_to_string("/proc/stat").ok()?;
        CpuTicks::parse_stat_line(content.lines().next()?)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Full /proc/cpuinfo text for the report's CPU section (raw, not computed).
pub(super) fn read_cpuinfo_raw() -> std::io::Result<String> {
    fs::read_to_string("/proc/cpuinfo")
}

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Read the distro's display name from /etc/os-release (Linux).
pub(super) fn read_os_name() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = fs::read_to_string("/etc/os-release").ok()?;
        for key in ["PRETTY_NAME=", "NAME="] {
            for line in content.lines() {
                if let Some(v) = line.strip_prefix(key) {
                    let v = v.trim_matches('"');
                    if !v.is_empty() {
                        return Some(v.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Read system vendor and product model from DMI (Linux).
pub(super) fn read_dmi_identity() -> (Option<String>, Option<String>) {
    (
        read_trimmed(Path::new("/sys/class/dmi/id/sys_vendor")),
        read_trimmed(Path::new("/sys/class/dmi/id/product_name")),
    )
}

/// Read network interface link speed from /sys/class/net/<interface>/speed (Linux).
/// Returns speed in Mbps, or `None` if unavailable (a down link reports -1).
pub(super) fn interface_speed_mbps(interface_name: &str) -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/speed", interface_name);
        if let Ok(content) = fs::read_to_string(&path)
            && let Ok(mbps) = content.trim().parse::<i64>()
            && mbps > 0
        {
            return Some(mbps as u64);
        }
    }
    None
}

/// Raw power-supply readings for the first device of type "Battery".
/// Fields the kernel does not expose stay at -1 so the decoder treats them
/// as absent.
pub(super) fn read_battery_reading() -> Result<BatteryReading, ProbeError> {
    let entries = match fs::read_dir("/sys/class/power_supply") {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ProbeError::PermissionDenied("Power supply state"));
        }
        Err(_) => return Err(ProbeError::Unavailable("no power supply class".into())),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if read_trimmed(&path.join("type")).as_deref() != Some("Battery") {
            continue;
        }
        return Ok(BatteryReading {
            level: read_i32(&path.join("capacity")).unwrap_or(-1),
            scale: 100,
            status_code: read_trimmed(&path.join("status"))
                .map(|s| status_code_from_sysfs(&s))
                .unwrap_or(-1),
            health_code: read_trimmed(&path.join("health"))
                .map(|s| health_code_from_sysfs(&s))
                .unwrap_or(-1),
            // The kernel reports temp in tenths of a degree Celsius already.
            temperature_tenths: read_i32(&path.join("temp")).unwrap_or(-1),
            voltage_mv: read_i32(&path.join("voltage_now"))
                .map(|uv| uv / 1000)
                .unwrap_or(-1),
            technology: read_trimmed(&path.join("technology")),
        });
    }
    Err(ProbeError::Unavailable("no battery present".into()))
}

/// Map sysfs status strings onto the closed status codes the decoder reads.
/// Unrecognized strings map to -1, which decodes to the Unknown fallback.
fn status_code_from_sysfs(status: &str) -> i32 {
    match status {
        "Charging" => 2,
        "Discharging" => 3,
        "Not charging" => 4,
        "Full" => 5,
        _ => -1,
    }
}

fn health_code_from_sysfs(health: &str) -> i32 {
    match health {
        "Good" => 2,
        "Overheat" => 3,
        "Dead" => 4,
        "Over voltage" => 5,
        "Unspecified failure" => 6,
        "Cold" => 7,
        _ => -1,
    }
}

/// Enumerate /sys/class/hwmon devices as the sensor inventory.
/// A missing hwmon class yields an empty inventory, not an error.
pub(super) fn read_sensor_inventory() -> std::io::Result<Vec<SensorInfo>> {
    let entries = match fs::read_dir("/sys/class/hwmon") {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let device = entry.file_name().to_string_lossy().into_owned();
        let name = read_trimmed(&path.join("name")).unwrap_or_else(|| device.clone());
        let mut kinds = Vec::new();
        for (channel_file, kind) in [
            ("temp1_input", "temperature"),
            ("in1_input", "voltage"),
            ("fan1_input", "fan"),
            ("power1_input", "power"),
            ("curr1_input", "current"),
        ] {
            if path.join(channel_file).exists() {
                kinds.push(kind);
            }
        }
        let kind = if kinds.is_empty() {
            "unknown".to_string()
        } else {
            kinds.join(", ")
        };
        out.push(SensorInfo { name, device, kind });
    }
    out.sort_by(|a, b| a.device.cmp(&b.device));
    Ok(out)
}

/// First interface under /sys/class/net that exposes a wireless/ directory.
pub(super) fn find_wireless_interface() -> Option<String> {
    let entries = fs::read_dir("/sys/class/net").ok()?;
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().join("wireless").is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.into_iter().next()
}

/// Signal level in dBm for an interface, from /proc/net/wireless.
pub(super) fn read_wireless_rssi(interface_name: &str) -> Result<Option<i32>, ProbeError> {
    let content = match fs::read_to_string("/proc/net/wireless") {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ProbeError::PermissionDenied("Wireless state"));
        }
        Err(_) => return Ok(None),
    };
    // Two header lines, then "wlan0: 0000   54.  -56.  -256 ..." per
    // interface; field 3 is the signal level, printed with a trailing dot.
    for line in content.lines().skip(2) {
        let mut fields = line.split_whitespace();
        let Some(iface) = fields.next().map(|f| f.trim_end_matches(':')) else {
            continue;
        };
        if iface != interface_name {
            continue;
        }
        let level = fields
            .nth(2)
            .and_then(|f| f.trim_end_matches('.').parse::<f64>().ok())
            .map(|v| v as i32);
        return Ok(level);
    }
    Ok(None)
}

/// SSID and BSSID of the current association, via `iw dev <if> link`.
/// A missing `iw` binary degrades to (None, None); a refused invocation is
/// surfaced as denied access.
pub(super) fn read_wifi_association(
    interface_name: &str,
) -> Result<(Option<String>, Option<String>), ProbeError> {
    let output = match Command::new("iw")
        .args(["dev", interface_name, "link"])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ProbeError::PermissionDenied("Wireless state"));
        }
        Err(_) => return Ok((None, None)),
    };
    if !output.status.success() {
        return Ok((None, None));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let mut ssid = None;
    let mut bssid = None;
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Connected to ") {
            bssid = rest.split_whitespace().next().map(str::to_string);
        } else if let Some(rest) = line.strip_prefix("SSID: ") {
            let rest = rest.trim();
            if !rest.is_empty() {
                ssid = Some(rest.to_string());
            }
        }
    }
    Ok((ssid, bssid))
}

/// Operator name of the active modem, via ModemManager's mmcli.
pub(super) fn read_cellular_operator() -> Result<CellularInfo, ProbeError> {
    let has_modem_interface = fs::read_dir("/sys/class/net")
        .map(|entries| {
            entries
                .flatten()
                .any(|e| e.file_name().to_string_lossy().starts_with("wwan"))
        })
        .unwrap_or(false);
    if !has_modem_interface {
        return Err(ProbeError::Unavailable("no cellular modem".into()));
    }

    let output = match Command::new("mmcli")
        .args(["-m", "any", "--output-keyvalue"])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ProbeError::PermissionDenied("Phone state"));
        }
        Err(e) => return Err(ProbeError::Unavailable(format!("mmcli unavailable: {e}"))),
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("not authorized") {
            return Err(ProbeError::PermissionDenied("Phone state"));
        }
        return Err(ProbeError::Unavailable(format!(
            "mmcli failed: {}",
            stderr.trim()
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim() == "modem.3gpp.operator-name" {
            let value = value.trim();
            let operator = if value.is_empty() || value == "--" {
                "Unknown".to_string()
            } else {
                value.to_string()
            };
            return Ok(CellularInfo { operator });
        }
    }
    Err(ProbeError::Unavailable("operator name not reported".into()))
}

fn read_trimmed(path: &Path) -> Option<String> {
    let v = fs::read_to_string(path).ok()?;
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    Some(v.to_string())
}

fn read_i32(path: &Path) -> Option<i32> {
    read_trimmed(path)?.parse().ok()
}

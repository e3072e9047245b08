// Static device identity and the sensor inventory

use serde::{Deserialize, Serialize};

/// Static host identity; gathered once per report, not per sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub arch: String,
    pub vendor: String,
    pub model: String,
    pub cpu_model: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorInfo {
    pub name: String,
    pub device: String,
    pub kind: String,
}

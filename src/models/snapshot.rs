// Dashboard snapshot: one sampling iteration's worth of telemetry

use serde::{Deserialize, Serialize};

use super::{BatteryState, CpuStats, MemorySnapshot, StorageSnapshot};

/// Produced once per dashboard tick and consumed within the same tick;
/// snapshots carry no identity across samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub timestamp_ms: u64,
    pub cpu: CpuStats,
    pub memory: MemorySnapshot,
    pub storage: StorageSnapshot,
    /// Absent on hosts without a battery.
    pub battery: Option<BatteryState>,
}

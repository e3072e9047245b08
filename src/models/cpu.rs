// CPU tick accounting and derived usage

use serde::{Deserialize, Serialize};

/// One point-in-time reading of the aggregate `cpu` line from the kernel
/// stat file. Two readings taken a short interval apart are differenced to
/// derive a usage percentage; a single reading carries no usage on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTicks {
    pub idle: u64,
    pub total: u64,
}

impl CpuTicks {
    /// Parse the aggregate line of /proc/stat, e.g.
    /// `cpu  4705 150 1120 16250 520 0 175 0 0 0`.
    ///
    /// The idle counter is the fourth numeric field; the total is the sum of
    /// every numeric field on the line. Returns `None` for anything that is
    /// not a well-formed aggregate cpu line.
    pub fn parse_stat_line(line: &str) -> Option<CpuTicks> {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("cpu") {
            return None;
        }
        let values: Vec<u64> = fields.map(|f| f.parse().ok()).collect::<Option<_>>()?;
        if values.len() < 4 {
            return None;
        }
        Some(CpuTicks {
            idle: values[3],
            total: values.iter().sum(),
        })
    }

    /// Usage percentage over the window from `self` to `later`:
    /// `100 * (total_diff - idle_diff) / total_diff`.
    ///
    /// An empty window (no tick movement, or a counter reset) reads as 0%
    /// rather than dividing by zero; only an unreadable stat source makes
    /// usage unavailable, and that is the caller's concern.
    pub fn usage_since(&self, later: &CpuTicks) -> f64 {
        if later.total <= self.total {
            return 0.0;
        }
        let total_diff = (later.total - self.total) as f64;
        let idle_diff = later.idle.saturating_sub(self.idle) as f64;
        (100.0 * (total_diff - idle_diff) / total_diff).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStats {
    pub model: String,
    pub logical_cores: u32,
    /// `None` when the stat source was unreadable.
    pub usage_percent: Option<f64>,
}

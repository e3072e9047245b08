use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampling: SamplingConfig,
    pub report: ReportConfig,
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Dashboard refresh period.
    pub dashboard_interval_ms: u64,
    /// Pause between the two stat readings of one CPU usage computation.
    pub cpu_probe_delay_ms: u64,
    /// Mount point whose totals feed the storage gauge and report section.
    pub data_mount: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            dashboard_interval_ms: 2000,
            cpu_probe_delay_ms: 500,
            data_mount: "/".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for SystemInfo_<timestamp>.txt files; created if absent.
    pub log_dir: String,
    /// Also write a report every N seconds while running; 0 = trigger-only.
    pub periodic_interval_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            periodic_interval_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Path of the key-value settings file (snapshot-logger enable flag).
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: "settings.json".into(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.toml`); a missing file means
    /// built-in defaults. Every field has a default, so partial files work.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            let config = AppConfig::default();
            config.validate()?;
            return Ok(config);
        }
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.sampling.dashboard_interval_ms > 0,
            "sampling.dashboard_interval_ms must be > 0, got {}",
            self.sampling.dashboard_interval_ms
        );
        anyhow::ensure!(
            self.sampling.cpu_probe_delay_ms > 0,
            "sampling.cpu_probe_delay_ms must be > 0, got {}",
            self.sampling.cpu_probe_delay_ms
        );
        anyhow::ensure!(
            self.sampling.cpu_probe_delay_ms < self.sampling.dashboard_interval_ms,
            "sampling.cpu_probe_delay_ms must be shorter than dashboard_interval_ms, got {} >= {}",
            self.sampling.cpu_probe_delay_ms,
            self.sampling.dashboard_interval_ms
        );
        anyhow::ensure!(
            !self.sampling.data_mount.is_empty(),
            "sampling.data_mount must be non-empty"
        );
        anyhow::ensure!(
            !self.report.log_dir.is_empty(),
            "report.log_dir must be non-empty"
        );
        anyhow::ensure!(
            !self.settings.path.is_empty(),
            "settings.path must be non-empty"
        );
        Ok(())
    }
}

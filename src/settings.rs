// App settings: a single boolean flag in a file-backed key-value store.
// The store is an injected collaborator so the service entry points never
// reach for a global.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub trait SettingsStore: Send + Sync {
    fn snapshot_logger_enabled(&self) -> anyhow::Result<bool>;
    fn set_snapshot_logger_enabled(&self, enabled: bool) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsFile {
    snapshot_logger_enabled: bool,
}

/// JSON file store; a missing file reads as all-defaults (flag off).
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> anyhow::Result<SettingsFile> {
        if !self.path.exists() {
            return Ok(SettingsFile::default());
        }
        let s = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&s)?)
    }

    fn write(&self, file: &SettingsFile) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn snapshot_logger_enabled(&self) -> anyhow::Result<bool> {
        Ok(self.read()?.snapshot_logger_enabled)
    }

    fn set_snapshot_logger_enabled(&self, enabled: bool) -> anyhow::Result<()> {
        let mut file = self.read()?;
        file.snapshot_logger_enabled = enabled;
        self.write(&file)
    }
}

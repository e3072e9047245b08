// File-backed settings store: defaults, persistence, and reload.

use devwatch::settings::{FileSettings, SettingsStore};

#[test]
fn missing_file_reads_as_disabled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSettings::new(dir.path().join("settings.json"));
    assert!(!store.snapshot_logger_enabled().expect("read flag"));
}

#[test]
fn enable_persists_across_store_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    let store = FileSettings::new(&path);
    store
        .set_snapshot_logger_enabled(true)
        .expect("enable flag");
    assert!(store.snapshot_logger_enabled().expect("read flag"));

    // A fresh instance sees the persisted value.
    let reopened = FileSettings::new(&path);
    assert!(reopened.snapshot_logger_enabled().expect("read flag"));

    reopened
        .set_snapshot_logger_enabled(false)
        .expect("disable flag");
    assert!(!FileSettings::new(&path)
        .snapshot_logger_enabled()
        .expect("read flag"));
}

#[test]
fn creates_parent_directories_on_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/config/settings.json");

    let store = FileSettings::new(&path);
    store
        .set_snapshot_logger_enabled(true)
        .expect("enable flag");
    assert!(path.exists());
}

#[test]
fn persisted_file_uses_camel_case_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    FileSettings::new(&path)
        .set_snapshot_logger_enabled(true)
        .expect("enable flag");

    let raw = std::fs::read_to_string(&path).expect("read settings file");
    assert!(raw.contains("\"snapshotLoggerEnabled\": true"));
}

#[test]
fn unknown_keys_in_file_are_tolerated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"snapshotLoggerEnabled": true, "legacyKey": 3}"#)
        .expect("seed settings file");

    assert!(FileSettings::new(&path)
        .snapshot_logger_enabled()
        .expect("read flag"));
}

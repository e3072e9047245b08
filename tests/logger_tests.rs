// Snapshot logger and trigger listener against the real host probes.

use devwatch::config::SamplingConfig;
use devwatch::logger::SnapshotLogger;
use devwatch::probes::TelemetryProbes;
use devwatch::trigger::{self, TriggerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

fn fast_probes() -> Arc<TelemetryProbes> {
    Arc::new(TelemetryProbes::new(&SamplingConfig {
        dashboard_interval_ms: 25,
        cpu_probe_delay_ms: 5,
        data_mount: "/".into(),
    }))
}

#[tokio::test]
async fn write_snapshot_creates_timestamped_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = SnapshotLogger::new(fast_probes(), dir.path().join("logs"));

    let path = logger.write_snapshot().await.expect("report write");

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("report file name");
    assert!(name.starts_with("SystemInfo_"));
    assert!(name.ends_with(".txt"));

    let body = std::fs::read_to_string(&path).expect("read report");
    assert!(body.starts_with("System Info Dump at "));
    for header in [
        "--- BUILD INFO ---",
        "--- CPU INFO ---",
        "--- MEMORY (RAM) ---",
        "--- STORAGE ---",
        "--- BATTERY ---",
        "--- SENSORS ---",
        "--- CONNECTIVITY ---",
    ] {
        assert!(body.contains(header), "missing section {header}");
    }
}

#[tokio::test]
async fn periodic_trigger_writes_reports_until_shutdown() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_dir = dir.path().join("logs");
    let logger = Arc::new(SnapshotLogger::new(fast_probes(), &log_dir));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = trigger::spawn_listener(
        logger,
        TriggerConfig {
            periodic_interval: Some(Duration::from_millis(50)),
        },
        shutdown_rx,
    );

    // The first tick is swallowed on purpose, so wait out at least one full
    // period plus the report's own probe time.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut wrote = false;
    while tokio::time::Instant::now() < deadline {
        if log_dir.exists()
            && std::fs::read_dir(&log_dir)
                .map(|mut d| d.next().is_some())
                .unwrap_or(false)
        {
            wrote = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert!(wrote, "periodic trigger should have written a report");

    shutdown_tx.send(()).expect("trigger should still be alive");
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("trigger should stop after shutdown")
        .expect("trigger task should not panic");
}

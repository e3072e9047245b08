// Dashboard sampling worker: one telemetry snapshot per tick, broadcast to
// whoever renders it. Each iteration is independent; the loop only ends on
// shutdown.

use crate::models::TelemetrySnapshot;
use crate::probes::TelemetryProbes;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tokio::time::{Duration, Instant, interval};

/// Rate limit for the "no receivers" note (avoid logging every tick when no
/// dashboard is attached).
const NO_RECEIVERS_NOTE_INTERVAL: Duration = Duration::from_secs(60);

pub struct WorkerDeps {
    pub probes: Arc<TelemetryProbes>,
    pub tx: broadcast::Sender<TelemetrySnapshot>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub sample_interval_ms: u64,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        probes,
        tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig { sample_interval_ms } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last_no_receivers_note: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let timestamp_ms = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_millis() as u64)
                        .unwrap_or_else(|e| {
                            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
                            0
                        });

                    let cpu = match probes.cpu_stats().await {
                        Ok(c) => c,
                        Err(e) => {
                            tracing::warn!(error = %e, operation = "cpu_stats", "CPU sample failed");
                            continue;
                        }
                    };
                    let memory = match probes.memory_snapshot().await {
                        Ok(m) => m,
                        Err(e) => {
                            tracing::warn!(error = %e, operation = "memory_snapshot", "memory sample failed");
                            continue;
                        }
                    };
                    let storage = match probes.storage_snapshot().await {
                        Ok(s) => s,
                        Err(e) => {
                            tracing::warn!(error = %e, operation = "storage_snapshot", "storage sample failed");
                            continue;
                        }
                    };
                    // Battery is best-effort: desktops simply have none.
                    let battery = probes.battery_state().await.ok();

                    let snapshot = TelemetrySnapshot {
                        timestamp_ms,
                        cpu,
                        memory,
                        storage,
                        battery,
                    };

                    if tx.send(snapshot).is_err() {
                        let should_note = last_no_receivers_note
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_NOTE_INTERVAL);
                        if should_note {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "no dashboard attached; broadcast channel has no receivers"
                            );
                            last_no_receivers_note = Some(Instant::now());
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Sampling worker shutting down");
                    break;
                }
            }
        }
    })
}

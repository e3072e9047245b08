// Snapshot triggers: subscribe on start, write a report per event,
// unsubscribe on shutdown. SIGUSR1 stands in for the platform's screen-off
// broadcast; an optional repeating timer covers unattended hosts.

use crate::logger::SnapshotLogger;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{Duration, MissedTickBehavior, interval};

pub struct TriggerConfig {
    /// `None` means signal-only operation.
    pub periodic_interval: Option<Duration>,
}

#[cfg(unix)]
type SnapshotSignal = tokio::signal::unix::Signal;
#[cfg(not(unix))]
type SnapshotSignal = ();

#[cfg(unix)]
fn subscribe_signal() -> Option<SnapshotSignal> {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::user_defined1()) {
        Ok(signal) => Some(signal),
        Err(e) => {
            tracing::warn!(error = %e, "could not subscribe to SIGUSR1; timer trigger only");
            None
        }
    }
}

#[cfg(not(unix))]
fn subscribe_signal() -> Option<SnapshotSignal> {
    None
}

#[cfg(unix)]
async fn signal_fired(signal: &mut Option<SnapshotSignal>) {
    match signal {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(not(unix))]
async fn signal_fired(_signal: &mut Option<SnapshotSignal>) {
    std::future::pending::<()>().await
}

pub fn spawn_listener(
    logger: Arc<SnapshotLogger>,
    config: TriggerConfig,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut signal = subscribe_signal();

        let periodic = config.periodic_interval;
        let mut tick = interval(periodic.unwrap_or(Duration::from_secs(3600)));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // An interval's first tick completes immediately; swallow it so the
        // timer fires one full period after startup.
        tick.tick().await;

        tracing::info!(
            periodic_secs = periodic.map(|d| d.as_secs()),
            "snapshot trigger listening"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    tracing::debug!("Snapshot trigger shutting down");
                    break;
                }
                _ = signal_fired(&mut signal) => {
                    write_report(&logger, "signal").await;
                }
                _ = tick.tick(), if periodic.is_some() => {
                    write_report(&logger, "timer").await;
                }
            }
        }
    })
}

async fn write_report(logger: &SnapshotLogger, trigger: &'static str) {
    if let Err(e) = logger.write_snapshot().await {
        tracing::warn!(error = %e, trigger, "snapshot report failed");
    }
}

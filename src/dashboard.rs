// Text dashboard: percentage gauges for each broadcast snapshot.

use crate::models::TelemetrySnapshot;
use crate::report::format_size;
use tokio::sync::broadcast;

const GAUGE_WIDTH: usize = 10;

fn gauge(percent: f64) -> String {
    let filled = ((percent / 100.0 * GAUGE_WIDTH as f64).round() as usize).min(GAUGE_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))
}

/// One dashboard frame. The CPU card shows "Not available" while the stat
/// source yields no usable delta; the battery card is omitted on hosts
/// without one.
pub fn render_snapshot(s: &TelemetrySnapshot) -> String {
    let mut lines = Vec::new();

    match s.cpu.usage_percent {
        Some(pct) => lines.push(format!("CPU Usage        {} {:.2}%", gauge(pct), pct)),
        None => lines.push(format!(
            "CPU Usage        [{}] Not available",
            "-".repeat(GAUGE_WIDTH)
        )),
    }

    lines.push(format!(
        "RAM Usage        {} {} / {}",
        gauge(s.memory.usage_percent()),
        format_size(s.memory.used_bytes()),
        format_size(s.memory.total_bytes),
    ));

    if let Some(battery) = &s.battery
        && let Some(pct) = battery.percent
    {
        lines.push(format!(
            "Battery          {} {:.0}% ({})",
            gauge(pct as f64),
            pct,
            battery.status,
        ));
    }

    lines.push(format!(
        "Storage {:<8} {} {} / {}",
        s.storage.mount,
        gauge(s.storage.usage_percent()),
        format_size(s.storage.used_bytes()),
        format_size(s.storage.total_bytes),
    ));

    lines.join("\n")
}

/// Print one frame per received snapshot until the channel closes.
pub async fn run(mut rx: broadcast::Receiver<TelemetrySnapshot>) {
    loop {
        match rx.recv().await {
            Ok(snapshot) => {
                println!("{}\n", render_snapshot(&snapshot));
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "dashboard lagged behind sampler");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use devwatch::config::AppConfig;
use devwatch::logger::SnapshotLogger;
use devwatch::probes::TelemetryProbes;
use devwatch::settings::{FileSettings, SettingsStore};
use devwatch::{dashboard, trigger, worker};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "devwatch")]
#[command(version, about = "Host telemetry dashboard and snapshot logger")]
struct Cli {
    /// Config file path; falls back to CONFIG_FILE, then ./config.toml.
    #[arg(long)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the live dashboard; snapshots on SIGUSR1 when the logger is enabled.
    Run {
        /// Sample without printing dashboard gauges.
        #[arg(long)]
        quiet: bool,
    },
    /// Write one snapshot report now and exit.
    Snapshot,
    /// Enable the background snapshot logger.
    Enable,
    /// Disable the background snapshot logger.
    Disable,
    /// Show whether the snapshot logger is enabled.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    let settings = FileSettings::new(&config.settings.path);

    match cli.command {
        Command::Run { quiet } => run(config, &settings, quiet).await,
        Command::Snapshot => {
            let probes = Arc::new(TelemetryProbes::new(&config.sampling));
            let logger = SnapshotLogger::new(probes, &config.report.log_dir);
            let path = logger.write_snapshot().await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Enable => {
            settings.set_snapshot_logger_enabled(true)?;
            println!("Snapshot logger enabled.");
            Ok(())
        }
        Command::Disable => {
            settings.set_snapshot_logger_enabled(false)?;
            println!("Snapshot logger disabled.");
            Ok(())
        }
        Command::Status => {
            let state = if settings.snapshot_logger_enabled()? {
                "enabled"
            } else {
                "disabled"
            };
            println!("Snapshot logger: {}", state);
            Ok(())
        }
    }
}

async fn run(config: AppConfig, settings: &dyn SettingsStore, quiet: bool) -> Result<()> {
    let probes = Arc::new(TelemetryProbes::new(&config.sampling));
    let (tx, _) = broadcast::channel(16);

    let (worker_shutdown_tx, worker_shutdown_rx) = oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            probes: probes.clone(),
            tx: tx.clone(),
            shutdown_rx: worker_shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_ms: config.sampling.dashboard_interval_ms,
        },
    );

    let dashboard_handle = if quiet {
        None
    } else {
        Some(tokio::spawn(dashboard::run(tx.subscribe())))
    };

    let trigger_task = if settings.snapshot_logger_enabled()? {
        let logger = Arc::new(SnapshotLogger::new(probes, &config.report.log_dir));
        let periodic_interval = (config.report.periodic_interval_secs > 0)
            .then(|| Duration::from_secs(config.report.periodic_interval_secs));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = trigger::spawn_listener(
            logger,
            trigger::TriggerConfig { periodic_interval },
            shutdown_rx,
        );
        Some((shutdown_tx, handle))
    } else {
        tracing::info!("snapshot logger disabled; enable with `devwatch enable`");
        None
    };

    shutdown_signal().await;
    tracing::info!("Received shutdown signal");

    let _ = worker_shutdown_tx.send(());
    if let Some((shutdown_tx, handle)) = trigger_task {
        let _ = shutdown_tx.send(());
        let _ = handle.await;
    }
    let _ = worker_handle.await;
    drop(tx);
    if let Some(handle) = dashboard_handle {
        let _ = handle.await;
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

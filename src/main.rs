//! parlaywatch - live point-spread parlay tracker for the terminal.

use anyhow::Context;
use parlaywatch::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to a daily rolling file; the terminal belongs to the UI.
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = parlaywatch::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "parlaywatch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parlaywatch=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let _guard = init_logging().context("initializing logging")?;

    // Load configuration
    let config = Config::load_or_init().context("loading configuration")?;

    // Run the application
    let mut app = App::new(config).await.context("starting parlaywatch")?;
    app.run().await?;

    Ok(())
}

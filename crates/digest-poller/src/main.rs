use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use digest_poller::cli::Cli;
use digest_poller::{DigestConfig, GoogleCalendarSource, PollingScheduler, WebhookSink};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Log file writer must outlive the subscriber, keep the guard until exit
    let (file_writer, _log_guard) = match cli
        .log_file_appender()
        .context("Failed to open log directory")?
    {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
        }))
        .init();

    tracing::info!("Starting weekly digest");

    let config = DigestConfig::load(&cli.config_dir).context("Failed to load configuration")?;

    if config.calendars.is_empty() {
        tracing::warn!(
            "No calendars configured in {}, nothing to do",
            cli.config_dir.display()
        );
        return Ok(());
    }

    let source = Arc::new(
        GoogleCalendarSource::new(
            config.google.api_base.clone(),
            config.google.token.clone(),
            config.http_timeout(),
        )
        .context("Failed to build calendar client")?,
    );
    let sink = Arc::new(
        WebhookSink::new(config.http_timeout()).context("Failed to build webhook client")?,
    );
    let scheduler = PollingScheduler::new(config, source, sink);

    if cli.once {
        scheduler.run_once().await;
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown.clone()));

    tracing::info!("Weekly digest running. Press Ctrl+C to stop.");
    wait_for_shutdown_signal().await?;
    tracing::info!("Shutdown signal received, stopping...");

    shutdown.cancel();
    scheduler_handle.await.context("Scheduler task failed")?;

    tracing::info!("Weekly digest stopped");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.context("Failed to listen for Ctrl+C")?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")
}

// shipdocs - CI/CD and Kubernetes reference viewer for the terminal
//
// The reference material is compiled in; the viewer shows it as one long
// scrollable document with a searchable sidebar.
//
// Architecture:
// - Content: section registry + Markdown library, parsed at startup
// - Viewer: the UI state owner (load phase, search, navigation, copy feedback)
// - TUI (ratatui): renders the viewer and routes input to its operations
// - Logging: tracing into an in-memory buffer, optionally JSON files
//
// `main` is the supervisor: any error that escapes the TUI restores the
// terminal and prints a fallback line instead of a raw panic.

mod cli;
mod config;
mod content;
mod logging;
mod tui;
mod viewer;

use anyhow::{Context, Result};
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    install_panic_hook();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tui::restore_terminal_raw();
            tracing::error!("Fatal error: {:?}", e);
            eprintln!("shipdocs stopped unexpectedly: {:#}", e);
            eprintln!("Run `shipdocs show <section>` to read the docs without the TUI.");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Subcommands print and exit before any terminal setup
    if cli::handle_cli()? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::load().context("Failed to load configuration")?;

    // Logs go to the buffer instead of stdout, which would garble the display
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, &log_buffer);

    tracing::info!(version = config::VERSION, theme = %config.theme, "Starting shipdocs");
    tui::run_tui(config, log_buffer).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Install the tracing subscriber
///
/// Precedence: RUST_LOG env var > config file > default "info". The returned
/// guard must live until exit so buffered file logs are flushed.
fn init_tracing(logging: &LoggingConfig, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("shipdocs={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking file writer, if file logging is enabled and usable
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let dir = &logging.file_dir;
    let prefix = &logging.file_prefix;
    let appender = match logging.file_rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
        LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
        LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
    };

    Some(tracing_appender::non_blocking(appender))
}

/// Restore the terminal before the default panic output
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tui::restore_terminal_raw();
        default_hook(info);
    }));
}

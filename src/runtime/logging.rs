use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Send `tracing` output to `tunedex.log`; the terminal belongs to the TUI.
///
/// `RUST_LOG` takes precedence over `logging.filter`. Keep the returned guard
/// alive until exit so buffered lines get flushed.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let dir = settings
        .directory
        .clone()
        .or_else(config::default_log_dir)
        .context("no log directory: set logging.directory or HOME")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, "tunedex.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}

//! Stdout and rolling-file log output

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset. Transport crates are noisy at info.
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn,alloy_transport_http=warn";

/// Keeps the file writer flushing until dropped.
pub struct LoggingGuard {
    pub log_dir: PathBuf,
    _file_writer: WorkerGuard,
}

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Human-readable lines on stdout plus an hourly rolling file in `log_dir`.
/// Cycle spans are kept in the file output so each line carries its cycle id.
pub fn setup_logging(log_dir: &str, file_prefix: &str) -> Result<Arc<LoggingGuard>> {
    let log_dir = PathBuf::from(log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let (file_writer, file_guard) = tracing_appender::non_blocking(rolling::hourly(&log_dir, file_prefix));

    let console = fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal());
    let file = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(log_filter())
        .with(console)
        .with(file)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(Arc::new(LoggingGuard {
        log_dir,
        _file_writer: file_guard,
    }))
}

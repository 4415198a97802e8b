//! # Diagnostic Logging
//!
//! Installs the `tracing` subscriber used for the recorder's own diagnostics.
//! These logs are separate from the channel trace files.

use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{RecorderError, Result};

/// Build the env filter for a configured level
///
/// `RUST_LOG` directives are honoured; the configured level is added on top.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    let level = Level::from_str(level)
        .map_err(|e| RecorderError::Logging(format!("invalid level '{}': {}", level, e)))?;

    Ok(EnvFilter::from_default_env().add_directive(level.into()))
}

/// Install the global diagnostic subscriber
///
/// When `config.file` is set, output goes through a non-blocking file writer
/// and the returned guard must be kept alive for the lifetime of the process.
///
/// # Errors
///
/// Returns `Logging` if the level is invalid, the file path has no file
/// name, or a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use peripheral_trace::config::LoggingConfig;
///
/// let _guard = peripheral_trace::logging::init(&LoggingConfig::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.level)?;

    let Some(file) = &config.file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| RecorderError::Logging(e.to_string()))?;
        return Ok(None);
    };

    let path = Path::new(file);
    let file_name = path
        .file_name()
        .ok_or_else(|| RecorderError::Logging(format!("log file path has no file name: {}", file)))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| RecorderError::Logging(e.to_string()))?;

    Ok(Some(guard))
}

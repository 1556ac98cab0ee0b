//! Logging setup
//!
//! Console output always; a daily rolling file in `LoggingConfig::directory`
//! when one is configured. The library itself only emits `tracing` events,
//! so embedding applications are free to install their own subscriber.

use crate::infrastructure::config::LoggingConfig;
use crate::{ConverterError, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log file name prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "symbol-converter";

/// Initialize the global subscriber
///
/// Returns the file writer's WorkerGuard when file logging is enabled; it
/// must be kept alive for the duration of the program.
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.level)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let (writer, guard) = create_appender(dir)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            let layer = if config.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| ConverterError::Logging(e.to_string()))?;

    tracing::info!(
        level = %config.level,
        directory = ?config.directory,
        "Logging initialized"
    );

    Ok(guard)
}

/// Parse an EnvFilter directive
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| ConverterError::Logging(format!("invalid log level {:?}: {}", level, e)))
}

/// Create a daily rolling, non-blocking file appender
fn create_appender(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);

    Ok(tracing_appender::non_blocking(appender))
}

//! Logging initialization for embedding applications.
//!
//! Structured logging via the `tracing` crate. The store itself only
//! emits events; embedders that want them rendered call
//! [`init_logging`] once at startup, or install their own subscriber.

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Errors raised while installing the logging subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log format: {0} (must be 'json' or 'text')")]
    InvalidFormat(String),

    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Initialize the global logging subscriber.
///
/// The `FRAMESTORE_LOG` environment variable overrides the configured
/// level and accepts any `tracing_subscriber::EnvFilter` directive;
/// `FRAMESTORE_LOG_FORMAT` overrides the format.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_env("FRAMESTORE_LOG") {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
}

fn determine_format(config: &LoggingConfig) -> Result<String, LoggingError> {
    if let Ok(format) = std::env::var("FRAMESTORE_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(LoggingError::InvalidFormat(other.to_string())),
    }
}

//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Compact human-readable lines.
    Compact,
}

impl LogFormat {
    /// JSON when `RUST_ENV=production`, compact otherwise.
    pub fn from_env() -> Self {
        let is_production = std::env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        if is_production {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to everything
/// and the skinarb crates log at debug.
pub fn build_env_filter(default_level: &str) -> TelemetryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(format!(
        "{default_level},skinarb=debug,skinarb_market=debug,skinarb_bot=debug"
    ))
    .map_err(|e| TelemetryError::InvalidFilter(format!("{default_level}: {e}")))
}

/// Initialize structured logging on stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> TelemetryResult<()> {
    let env_filter = build_env_filter(default_level)?;

    let result = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

//! Structured logging for skinarb.
//!
//! Logs are written to stderr so that stdout carries only the deal report.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{build_env_filter, init_logging, LogFormat};

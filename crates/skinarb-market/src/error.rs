//! Market fetcher error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Rate limited (HTTP 429)")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl MarketError {
    /// HTTP status code behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Status { status, .. } => Some(*status),
            Self::HttpClient(_) | Self::Parse(_) => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

pub type MarketResult<T> = Result<T, MarketError>;

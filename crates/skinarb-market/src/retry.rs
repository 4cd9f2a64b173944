//! Retry with exponential backoff on rate limiting.
//!
//! Only `MarketError::RateLimited` is retried. Every other error is returned
//! to the caller on the first occurrence.

use crate::error::MarketResult;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of retries after the initial request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(2000);

/// Retry budget and backoff schedule.
///
/// The delay before retry `n` (1-based) is `initial_delay * 2^(n-1)`:
/// 2000ms, 4000ms, 8000ms with the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the initial request (0 = no retry).
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each following one.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Delay before retry `retry` (1-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }
}

/// Run `op`, retrying while it reports rate limiting and budget remains.
///
/// Logs one warning per retry and sleeps the current delay before issuing
/// the next attempt. Once the budget is spent the last `RateLimited` error
/// is returned.
pub async fn retry_on_rate_limit<T, F, Fut>(
    policy: &RetryPolicy,
    source: &str,
    mut op: F,
) -> MarketResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = MarketResult<T>>,
{
    let mut retry = 0;

    loop {
        match op().await {
            Err(e) if e.is_rate_limited() && retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for_retry(retry);
                warn!(
                    source,
                    retry,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited (429), retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

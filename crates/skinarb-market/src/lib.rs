//! Listing fetchers for the two marketplaces skinarb compares.
//!
//! - `CasinoClient`: 500.casino trading market, bearer-token auth, prices
//!   converted from BUX to USD with a fixed rate
//! - `CsFloatClient`: CSFloat listings, no auth, prices already in USD,
//!   retried with exponential backoff on HTTP 429
//!
//! Both expose `fetch_listings()`, which never fails: errors are logged and
//! an empty list is returned so the comparison can still run.

pub mod casino;
pub mod csfloat;
pub mod error;
mod http;
mod normalize;
pub mod retry;

pub use casino::{CasinoClient, CASINO_MARKET_URL};
pub use csfloat::CsFloatClient;
pub use error::{MarketError, MarketResult};
pub use retry::{retry_on_rate_limit, RetryPolicy};

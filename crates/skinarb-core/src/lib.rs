//! Core types shared by the skinarb crates.
//!
//! - `Price`: exact USD amount backed by `rust_decimal`
//! - `Listing`: one normalized marketplace offer, keyed by market-hash name

pub mod decimal;
pub mod error;
pub mod listing;

pub use decimal::Price;
pub use error::{CoreError, Result};
pub use listing::Listing;

//! Normalized marketplace listing.

use crate::decimal::Price;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A single offer from a marketplace, normalized to `(name, price_usd)`.
///
/// `name` is the market-hash name and is the join key across marketplaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub price_usd: Price,
}

impl Listing {
    /// Create a listing, rejecting negative prices.
    pub fn new(name: impl Into<String>, price_usd: Price) -> Result<Self> {
        if price_usd.is_negative() {
            return Err(CoreError::InvalidListing(format!(
                "negative price {price_usd}"
            )));
        }
        Ok(Self {
            name: name.into(),
            price_usd,
        })
    }
}

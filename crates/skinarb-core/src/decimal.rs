//! Exact decimal prices.
//!
//! Marketplace APIs report prices as JSON floats. They are converted to
//! `Decimal` once at the edge so that conversion, comparison and
//! percentage math downstream are exact.

use crate::error::{CoreError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places used when prices and percentages are displayed.
pub const DISPLAY_DP: u32 = 2;

/// Price in USD with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Convert a raw JSON number into a price.
    ///
    /// Fails for NaN and infinities, which have no decimal representation.
    pub fn from_f64(value: f64) -> Result<Self> {
        Decimal::try_from(value)
            .map(Self)
            .map_err(|e| CoreError::InvalidPrice(format!("{value}: {e}")))
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Percentage by which `self` is below `reference`.
    ///
    /// `(reference - self) / reference * 100`. Returns `None` when the
    /// reference is zero.
    #[inline]
    pub fn discount_pct_from(&self, reference: Price) -> Option<Decimal> {
        if reference.is_zero() {
            return None;
        }
        Some((reference.0 - self.0) / reference.0 * Decimal::ONE_HUNDRED)
    }

    /// Currency conversion: native amount times a rate.
    ///
    /// Returns `None` when the product does not fit in a `Decimal`.
    #[inline]
    pub fn checked_mul(&self, rate: Decimal) -> Option<Self> {
        self.0.checked_mul(rate).map(Self)
    }

    /// Two-decimal string form, e.g. `"10.00"`.
    pub fn to_cents_string(&self) -> String {
        format!("{:.2}", round_display(self.0))
    }
}

/// Round a value to `DISPLAY_DP` places, half away from zero.
#[inline]
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

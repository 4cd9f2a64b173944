//! Deal types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use skinarb_core::decimal::round_display;
use skinarb_core::Price;

/// An item that is cheaper on Source A than on Source B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Market-hash name shared by both listings.
    pub name: String,
    /// Source A price (USD).
    pub price_a: Price,
    /// Source B price (USD).
    pub price_b: Price,
    /// `(price_b - price_a) / price_b * 100`, rounded to two decimals.
    /// Deals are ranked on this value.
    pub discount_pct: Decimal,
}

impl Deal {
    /// Build a deal when `price_a` is strictly below `price_b`.
    pub fn new(name: impl Into<String>, price_a: Price, price_b: Price) -> Option<Self> {
        if price_a >= price_b {
            return None;
        }
        let discount_pct = round_display(price_a.discount_pct_from(price_b)?);
        Some(Self {
            name: name.into(),
            price_a,
            price_b,
            discount_pct,
        })
    }

    /// Source A price, e.g. `"10.00"`.
    pub fn price_a_display(&self) -> String {
        self.price_a.to_cents_string()
    }

    /// Source B price, e.g. `"20.00"`.
    pub fn price_b_display(&self) -> String {
        self.price_b.to_cents_string()
    }

    /// Discount with a percent sign, e.g. `"50.00%"`.
    pub fn discount_display(&self) -> String {
        format!("{:.2}%", self.discount_pct)
    }

    pub fn to_record(&self) -> DealRecord {
        DealRecord {
            name: self.name.clone(),
            price_a: self.price_a_display(),
            price_b: self.price_b_display(),
            discount: self.discount_display(),
        }
    }
}

/// Printable form of a deal, every value pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub name: String,
    pub price_a: String,
    pub price_b: String,
    pub discount: String,
}

impl From<&Deal> for DealRecord {
    fn from(deal: &Deal) -> Self {
        deal.to_record()
    }
}

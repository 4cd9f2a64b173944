//! Raw marketplace entries to `Listing`.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use skinarb_core::{Listing, Price};
use tracing::warn;

/// Decode each raw entry on its own.
///
/// A malformed entry is logged and skipped; the rest of the response is kept.
pub(crate) fn decode_entries<T: DeserializeOwned>(source: &str, entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(source, index, error = %e, "Skipping malformed listing");
                None
            }
        })
        .collect()
}

/// Build a listing from a raw name and price, applying a conversion rate.
///
/// Entries that cannot form a valid listing are logged and skipped.
pub(crate) fn normalize_listing(
    source: &str,
    name: String,
    raw_price: f64,
    rate: Decimal,
) -> Option<Listing> {
    let native = match Price::from_f64(raw_price) {
        Ok(price) => price,
        Err(e) => {
            warn!(source, name = %name, error = %e, "Skipping listing with unusable price");
            return None;
        }
    };

    let Some(converted) = native.checked_mul(rate) else {
        warn!(
            source,
            name = %name,
            price = raw_price,
            rate = %rate,
            "Skipping listing whose converted price overflows"
        );
        return None;
    };

    match Listing::new(name, converted) {
        Ok(listing) => Some(listing),
        Err(e) => {
            warn!(source, error = %e, "Skipping invalid listing");
            None
        }
    }
}

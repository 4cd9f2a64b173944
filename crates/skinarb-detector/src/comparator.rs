//! Name-keyed join of two listing sets.

use crate::deal::Deal;
use skinarb_core::{Listing, Price};
use std::collections::HashMap;

/// Find every Source A listing that is cheaper than the same item on Source B.
///
/// - Source B is indexed by name; when a name repeats, the last price wins.
/// - Every Source A listing is checked, so a name repeated on Source A can
///   produce several deals.
/// - Result is sorted by discount, highest first. Equal discounts (at the
///   two-decimal precision they are ranked on) keep Source A order.
///
/// Pure: inputs are not modified and the same inputs give the same output.
pub fn find_deals(listings_a: &[Listing], listings_b: &[Listing]) -> Vec<Deal> {
    if listings_a.is_empty() || listings_b.is_empty() {
        return Vec::new();
    }

    let prices_b: HashMap<&str, Price> = listings_b
        .iter()
        .map(|listing| (listing.name.as_str(), listing.price_usd))
        .collect();

    let mut deals: Vec<Deal> = listings_a
        .iter()
        .filter_map(|listing| {
            let price_b = prices_b.get(listing.name.as_str())?;
            Deal::new(listing.name.as_str(), listing.price_usd, *price_b)
        })
        .collect();

    deals.sort_by(|a, b| b.discount_pct.cmp(&a.discount_pct));
    deals
}

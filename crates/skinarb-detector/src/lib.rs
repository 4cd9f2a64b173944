//! Cross-marketplace price comparison.
//!
//! Joins Source A listings against Source B by market-hash name and reports
//! every item that is cheaper on Source A, ranked by discount.

pub mod comparator;
pub mod deal;

pub use comparator::find_deals;
pub use deal::{Deal, DealRecord};

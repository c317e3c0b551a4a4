//! Price Resolver: picks the cheapest known price within a group.

use rust_decimal::Decimal;

use pricecross_core::{Retailer, RetailerSet};

use crate::group::ListingGroup;

/// Resolves the minimum known price among the group's per-retailer
/// representatives and the retailer offering it.
///
/// Returns `(None, None)` when no retailer in the group has a known price
/// ("unknown", not zero). Ties on the minimum price resolve to the first
/// retailer in `RetailerSet` declaration order among the tied set.
#[must_use]
pub fn resolve_best_price(
    group: &ListingGroup,
    retailers: &RetailerSet,
) -> (Option<Decimal>, Option<Retailer>) {
    let mut best: Option<(Decimal, &Retailer)> = None;
    for retailer in retailers.iter() {
        let Some(price) = group.representative(retailer).and_then(|l| l.price) else {
            continue;
        };
        // Strict less-than keeps the earliest retailer on ties.
        match best {
            Some((best_price, _)) if price >= best_price => {}
            _ => best = Some((price, retailer)),
        }
    }
    match best {
        Some((price, retailer)) => (Some(price), Some(retailer.clone())),
        None => (None, None),
    }
}

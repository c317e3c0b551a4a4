use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::retailers::Retailer;

/// A cleaned per-retailer product listing, ready for grouping.
///
/// Produced by the engine's normalizer from one raw scraped table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub item_name: String,
    /// Listed price. `None` when the source had no price or the price text
    /// was unparseable.
    pub price: Option<Decimal>,
    /// Lower-cased, trimmed product code extracted upstream from the item
    /// title. Empty string means "no usable code", never a missing value.
    pub normalized_code: String,
    pub retailer: Retailer,
    /// Canonical product page URL. Required by short-form output only.
    pub source_url: Option<String>,
}

impl Listing {
    /// Returns `true` if the listing carries a usable (non-empty) code.
    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.normalized_code.is_empty()
    }
}

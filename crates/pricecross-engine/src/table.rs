//! Raw-table input boundary.
//!
//! ## Observed shape from the scraping collaborators
//!
//! Each scraper emits one spreadsheet per (retailer, category) with named
//! columns. Cells arrive as mixed JSON values: prices may be numbers or
//! strings with thousands separators and currency text ("1,299 EGP"),
//! codes may be numeric, and any cell may be null. The normalizer owns
//! coercion; this module only models the shape and resolves columns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pricecross_core::Retailer;

/// Column headers the scraping collaborators agree on.
pub const COLUMN_ITEM_NAME: &str = "Item Name";
pub const COLUMN_PRICE: &str = "New Price";
pub const COLUMN_CODE: &str = "Normalized Code";
pub const COLUMN_URL: &str = "Product URL";

/// One raw scraped table for a single retailer and category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub retailer: Retailer,
    /// Header row. Matched with surrounding whitespace trimmed.
    pub columns: Vec<String>,
    /// Row-major cells; each row is positionally aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    #[must_use]
    pub fn new(retailer: Retailer, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            retailer,
            columns,
            rows,
        }
    }

    /// Resolves a column by trimmed header match.
    #[must_use]
    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }
}

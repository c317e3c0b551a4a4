//! Listing Normalizer: raw scraped tables → cleaned [`Listing`] rows.
//!
//! Table shape is validated once here (the missing-column error is the
//! table-level recovery point for the pipeline); per-row problems are
//! soft — a row missing its name or code cell is dropped, an unparseable
//! price becomes "no price". No I/O happens in this module.

use rust_decimal::Decimal;
use serde_json::Value;

use pricecross_core::{Listing, OutputMode};

use crate::error::EngineError;
use crate::table::{RawTable, COLUMN_CODE, COLUMN_ITEM_NAME, COLUMN_PRICE, COLUMN_URL};

/// Columns a table must carry to participate in the given output mode.
#[must_use]
pub fn required_columns(output: OutputMode) -> &'static [&'static str] {
    match output {
        OutputMode::Long => &[COLUMN_ITEM_NAME, COLUMN_PRICE, COLUMN_CODE],
        OutputMode::Short => &[COLUMN_ITEM_NAME, COLUMN_PRICE, COLUMN_CODE, COLUMN_URL],
    }
}

/// Normalizes one raw retailer table into cleaned listings.
///
/// # Errors
///
/// Returns [`EngineError::MissingColumns`] if any required column is
/// absent; the caller is expected to skip this retailer for the category
/// and continue.
pub fn normalize_table(table: &RawTable, output: OutputMode) -> Result<Vec<Listing>, EngineError> {
    let missing: Vec<String> = required_columns(output)
        .iter()
        .copied()
        .filter(|col| table.column_index(col).is_none())
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingColumns {
            retailer: table.retailer.name().to_string(),
            missing,
        });
    }

    // Safe after the check above.
    let name_idx = table.column_index(COLUMN_ITEM_NAME).unwrap_or_default();
    let price_idx = table.column_index(COLUMN_PRICE).unwrap_or_default();
    let code_idx = table.column_index(COLUMN_CODE).unwrap_or_default();
    let url_idx = table.column_index(COLUMN_URL);

    let mut listings = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;

    for row in &table.rows {
        let item_name = stringify_cell(row.get(name_idx));
        let code = stringify_cell(row.get(code_idx));
        let (Some(item_name), Some(code)) = (item_name, code) else {
            dropped += 1;
            continue;
        };

        let price = row.get(price_idx).and_then(coerce_price);
        let source_url = url_idx
            .and_then(|idx| row.get(idx))
            .and_then(|cell| stringify_cell(Some(cell)));

        listings.push(Listing {
            item_name,
            price,
            normalized_code: code.to_lowercase(),
            retailer: table.retailer.clone(),
            source_url,
        });
    }

    if dropped > 0 {
        tracing::debug!(
            retailer = %table.retailer,
            dropped,
            "dropped rows missing name or code cells"
        );
    }

    Ok(listings)
}

/// Stringifies a cell, treating null/absent as missing. Strings are
/// trimmed; numbers and booleans pass through their display form.
fn stringify_cell(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a price cell to a decimal.
///
/// Numbers pass through; strings are stripped of thousands separators and
/// currency text first. Anything unparseable is "no price", never an error.
pub(crate) fn coerce_price(cell: &Value) -> Option<Decimal> {
    match cell {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => clean_price_text(s)?.parse().ok(),
        _ => None,
    }
}

/// Keeps digits and the first decimal point from a price string, dropping
/// separators and currency text: `"1,299 EGP"` → `"1299"`.
fn clean_price_text(text: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(text.len());
    let mut seen_dot = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            cleaned.push(c);
        }
    }
    if cleaned.chars().any(|c| c.is_ascii_digit()) {
        Some(cleaned)
    } else {
        None
    }
}

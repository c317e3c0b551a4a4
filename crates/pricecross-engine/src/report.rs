//! Report Assembler: shapes [`MatchResult`]s into sink-facing tables.
//!
//! Long form emits one name/price/SKU column triplet per retailer in
//! retailer-set order regardless of which retailers had data; short form
//! collapses each group to its winning retailer's row. The assembler
//! attaches a highlight policy where the sink should flag low-confidence
//! rows; presentation itself stays with the sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pricecross_core::{CompareConfig, MatchResult, OutputMode, RetailerSet, Tier};

/// Placeholder for a retailer with no listing in a group.
pub const NO_DATA: &str = "N/A";

/// Fill marker handed to the sink for weak-matched long-form rows.
pub const MARKER_WEAK: &str = "FFFACD";
/// Fill marker handed to the sink for unmatched long-form rows.
pub const MARKER_UNMATCHED: &str = "FF9999";
/// Fill marker handed to the sink for low-confidence short-form rows.
pub const MARKER_SHORT: &str = "FFFF00";

/// Tells the sink which rows deserve visual emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightPolicy {
    /// Rows with confidence strictly below this get the marker.
    pub below_confidence: f64,
    /// Opaque emphasis marker (a fill color for spreadsheet sinks).
    pub marker: String,
}

/// One assembled output table for a category and tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTable {
    pub category: String,
    pub mode: OutputMode,
    pub tier: Tier,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub highlight: Option<HighlightPolicy>,
}

impl ReportTable {
    /// Stable identifier used in logs and sink error context.
    #[must_use]
    pub fn name(&self) -> String {
        format!("cross-compare-{}-{}-{}", self.category, self.mode, self.tier)
    }
}

/// Assembles a category's results into tier-partitioned tables.
///
/// Long form produces matched / weak-matched / unmatched tables; short
/// form produces matched (tiers matched + weak-matched) and unmatched
/// tables with rows sorted by descending confidence, input order on ties.
/// Tables are emitted even when empty.
#[must_use]
pub fn assemble_category(
    category: &str,
    results: &[MatchResult],
    retailers: &RetailerSet,
    config: &CompareConfig,
) -> Vec<ReportTable> {
    match config.output {
        OutputMode::Long => assemble_long(category, results, retailers, config),
        OutputMode::Short => assemble_short(category, results, config),
    }
}

fn assemble_long(
    category: &str,
    results: &[MatchResult],
    retailers: &RetailerSet,
    config: &CompareConfig,
) -> Vec<ReportTable> {
    let mut columns = Vec::with_capacity(retailers.len() * 3 + 3);
    for retailer in retailers.iter() {
        columns.push(format!("{retailer} Item Name"));
        columns.push(format!("{retailer} Price"));
        columns.push(format!("{retailer} Item SKU"));
    }
    columns.push("Confidence".to_string());
    columns.push("Best Price".to_string());
    columns.push("Lowest Retailer".to_string());

    let tiers = [
        (Tier::Matched, None),
        (
            Tier::WeakMatched,
            Some(HighlightPolicy {
                below_confidence: config.thresholds.weak,
                marker: MARKER_WEAK.to_string(),
            }),
        ),
        (
            Tier::Unmatched,
            Some(HighlightPolicy {
                below_confidence: config.thresholds.minimum,
                marker: MARKER_UNMATCHED.to_string(),
            }),
        ),
    ];

    tiers
        .into_iter()
        .map(|(tier, highlight)| ReportTable {
            category: category.to_string(),
            mode: OutputMode::Long,
            tier,
            generated_at: Utc::now(),
            columns: columns.clone(),
            rows: results
                .iter()
                .filter(|r| r.tier == tier)
                .map(|r| long_row(r, retailers))
                .collect(),
            highlight,
        })
        .collect()
}

fn long_row(result: &MatchResult, retailers: &RetailerSet) -> Vec<Value> {
    let mut row = Vec::with_capacity(retailers.len() * 3 + 3);
    for retailer in retailers.iter() {
        match result.entry_for(retailer) {
            Some(entry) => {
                row.push(Value::String(entry.item_name.clone()));
                row.push(price_cell(entry.price.as_ref()));
            }
            None => {
                row.push(Value::String(NO_DATA.to_string()));
                row.push(Value::Null);
            }
        }
        // The SKU column repeats the group key even for absent retailers.
        row.push(Value::String(result.normalized_code.clone()));
    }
    row.push(Value::from(result.confidence));
    row.push(price_cell(result.best_price.as_ref()));
    row.push(match &result.best_retailer {
        Some(retailer) => Value::String(retailer.name().to_string()),
        None => Value::Null,
    });
    row
}

fn assemble_short(
    category: &str,
    results: &[MatchResult],
    config: &CompareConfig,
) -> Vec<ReportTable> {
    let columns: Vec<String> = [
        "Item Name",
        "Normalized Code",
        "Confidence",
        "Best Price",
        "Lowest Retailer",
        "Product URL",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let highlight = HighlightPolicy {
        below_confidence: config.thresholds.weak,
        marker: MARKER_SHORT.to_string(),
    };

    let partitions = [
        (Tier::Matched, vec![Tier::Matched, Tier::WeakMatched]),
        (Tier::Unmatched, vec![Tier::Unmatched]),
    ];

    partitions
        .into_iter()
        .map(|(table_tier, included)| {
            let mut selected: Vec<&MatchResult> = results
                .iter()
                .filter(|r| included.contains(&r.tier))
                .collect();
            // Stable sort keeps input order on confidence ties.
            selected.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            ReportTable {
                category: category.to_string(),
                mode: OutputMode::Short,
                tier: table_tier,
                generated_at: Utc::now(),
                columns: columns.clone(),
                rows: selected.iter().map(|r| short_row(r)).collect(),
                highlight: Some(highlight.clone()),
            }
        })
        .collect()
}

fn short_row(result: &MatchResult) -> Vec<Value> {
    // Representative fields come from the winning retailer; with no known
    // prices there is no winner, so fall back to the first entry in
    // retailer-set order.
    let representative = result
        .best_retailer
        .as_ref()
        .and_then(|r| result.entry_for(r))
        .or_else(|| result.entries.first().map(|(_, e)| e));

    let (item_name, url) = match representative {
        Some(entry) => (
            Value::String(entry.item_name.clone()),
            entry
                .source_url
                .clone()
                .map_or(Value::Null, Value::String),
        ),
        None => (Value::String(NO_DATA.to_string()), Value::Null),
    };

    vec![
        item_name,
        Value::String(result.normalized_code.clone()),
        Value::from(result.confidence),
        price_cell(result.best_price.as_ref()),
        match &result.best_retailer {
            Some(retailer) => Value::String(retailer.name().to_string()),
            None => Value::Null,
        },
        url,
    ]
}

/// Prices render as exact decimal strings; absent prices as null cells.
fn price_cell(price: Option<&rust_decimal::Decimal>) -> Value {
    price.map_or(Value::Null, |p| Value::String(p.to_string()))
}

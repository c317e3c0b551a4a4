//! Category pipeline orchestration.
//!
//! One category runs start to finish, synchronously and deterministically:
//!
//! 1. Normalize each retailer's raw table (missing-column tables are
//!    skipped with a warning, not fatal).
//! 2. Group the unioned listings by normalized code (two passes).
//! 3. Classify each surviving group with a confidence and tier.
//! 4. Resolve the cheapest retailer per group.
//! 5. Assemble tier-partitioned tables and hand them to the sink.
//!
//! Categories with fewer than two usable sources are skipped and recorded
//! in the run summary. No category failure halts the run.

use std::collections::HashSet;

use pricecross_core::{CompareConfig, Listing, RetailerSet, Tier};

use crate::classify::classify_category;
use crate::error::EngineError;
use crate::group::group_listings;
use crate::normalize::normalize_table;
use crate::report::assemble_category;
use crate::similarity::NameSimilarity;
use crate::sink::ReportSink;
use crate::table::RawTable;

/// Raw input for one category: one table per retailer that had data.
#[derive(Debug, Clone)]
pub struct CategorySource {
    pub category: String,
    pub tables: Vec<RawTable>,
}

/// Per-tier result counts for a processed category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: String,
    pub matched: usize,
    pub weak_matched: usize,
    pub unmatched: usize,
}

/// Why a category produced no comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two retailers supplied a table at all.
    TooFewSources,
    /// Tables existed but fewer than two distinct declared retailers
    /// supplied a usable one.
    TooFewUsableSources,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewSources => write!(f, "fewer than two source tables"),
            SkipReason::TooFewUsableSources => write!(f, "fewer than two usable source tables"),
        }
    }
}

/// A skipped category, kept for the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySkip {
    pub category: String,
    /// Retailers that supplied a table for this category.
    pub retailers_with_data: Vec<String>,
    pub reason: SkipReason,
}

/// Outcome of one category run.
#[derive(Debug)]
pub enum CategoryStatus {
    Processed(CategoryOutcome),
    Skipped(CategorySkip),
}

/// A category whose processing failed (sink rejection); the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    pub category: String,
    pub error: String,
}

/// End-of-run accounting across all categories.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: Vec<CategoryOutcome>,
    pub skipped: Vec<CategorySkip>,
    pub failed: Vec<CategoryFailure>,
}

/// Runs the full comparison for one category.
///
/// # Errors
///
/// Returns [`EngineError::Sink`] if the sink rejects a table. Input
/// problems (missing columns, too few sources) are recovered locally and
/// surface as a [`CategoryStatus::Skipped`], never as an error.
pub fn run_category<S: NameSimilarity>(
    category: &str,
    tables: &[RawTable],
    retailers: &RetailerSet,
    config: &CompareConfig,
    similarity: &S,
    sink: &mut dyn ReportSink,
) -> Result<CategoryStatus, EngineError> {
    let retailers_with_data: Vec<String> =
        tables.iter().map(|t| t.retailer.name().to_string()).collect();

    if tables.len() < 2 {
        tracing::info!(
            category,
            sources = tables.len(),
            "skipping category: fewer than two source tables"
        );
        return Ok(CategoryStatus::Skipped(CategorySkip {
            category: category.to_string(),
            retailers_with_data,
            reason: SkipReason::TooFewSources,
        }));
    }

    let mut listings: Vec<Listing> = Vec::new();
    // Distinct declared retailers with a usable table; duplicate tables from
    // one retailer cannot satisfy the cross-retailer gate.
    let mut usable: HashSet<&str> = HashSet::new();
    for table in tables {
        if !retailers.contains(&table.retailer) {
            tracing::warn!(
                category,
                retailer = %table.retailer,
                "skipping table from a retailer not in the declared set"
            );
            continue;
        }
        match normalize_table(table, config.output) {
            Ok(cleaned) => {
                usable.insert(table.retailer.name());
                listings.extend(cleaned);
            }
            Err(EngineError::MissingColumns { retailer, missing }) => {
                tracing::warn!(
                    category,
                    retailer,
                    ?missing,
                    "skipping retailer table with missing columns"
                );
            }
            Err(other) => return Err(other),
        }
    }

    if usable.len() < 2 {
        tracing::warn!(
            category,
            usable = usable.len(),
            "not enough usable sources to compare"
        );
        return Ok(CategoryStatus::Skipped(CategorySkip {
            category: category.to_string(),
            retailers_with_data,
            reason: SkipReason::TooFewUsableSources,
        }));
    }

    let grouped = group_listings(listings);
    let results = classify_category(grouped, retailers, config, similarity);

    let outcome = CategoryOutcome {
        category: category.to_string(),
        matched: results.iter().filter(|r| r.tier == Tier::Matched).count(),
        weak_matched: results
            .iter()
            .filter(|r| r.tier == Tier::WeakMatched)
            .count(),
        unmatched: results.iter().filter(|r| r.tier == Tier::Unmatched).count(),
    };

    for table in assemble_category(category, &results, retailers, config) {
        let name = table.name();
        sink.write_table(&table)
            .map_err(|source| EngineError::Sink {
                table: name,
                source,
            })?;
    }

    tracing::info!(
        category,
        matched = outcome.matched,
        weak_matched = outcome.weak_matched,
        unmatched = outcome.unmatched,
        "category comparison complete"
    );
    Ok(CategoryStatus::Processed(outcome))
}

/// Runs every category in turn and collects the run summary.
///
/// Processing is single-threaded and batch: each category completes before
/// the next starts, and a failure in one category never prevents the rest.
pub fn run_comparison<S: NameSimilarity>(
    sources: &[CategorySource],
    retailers: &RetailerSet,
    config: &CompareConfig,
    similarity: &S,
    sink: &mut dyn ReportSink,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for source in sources {
        match run_category(
            &source.category,
            &source.tables,
            retailers,
            config,
            similarity,
            sink,
        ) {
            Ok(CategoryStatus::Processed(outcome)) => summary.processed.push(outcome),
            Ok(CategoryStatus::Skipped(skip)) => summary.skipped.push(skip),
            Err(error) => {
                tracing::warn!(
                    category = %source.category,
                    error = %error,
                    "category failed; continuing with remaining categories"
                );
                summary.failed.push(CategoryFailure {
                    category: source.category.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    tracing::info!(
        processed = summary.processed.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "comparison run complete"
    );
    for skip in &summary.skipped {
        tracing::info!(
            category = %skip.category,
            retailers = ?skip.retailers_with_data,
            reason = %skip.reason,
            "skipped category"
        );
    }

    summary
}

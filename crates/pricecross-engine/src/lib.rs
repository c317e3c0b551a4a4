//! Cross-retailer price reconciliation engine.
//!
//! Takes raw per-retailer listing tables for one product category, cleans
//! them, groups listings by normalized product code (with a residual
//! fuzzy-name pass), scores each group with a confidence value, resolves
//! the cheapest retailer, and hands tier-partitioned report tables to a
//! [`ReportSink`]. Scraping and spreadsheet styling live outside this
//! crate; the engine only sees tables in and tables out.

pub mod classify;
pub mod error;
pub mod group;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod similarity;
pub mod sink;
pub mod table;

pub use classify::classify_category;
pub use error::EngineError;
pub use group::{group_listings, GroupedCategory, ListingGroup};
pub use normalize::normalize_table;
pub use pipeline::{
    run_category, run_comparison, CategoryFailure, CategoryOutcome, CategorySkip, CategorySource,
    CategoryStatus, RunSummary, SkipReason,
};
pub use report::{assemble_category, HighlightPolicy, ReportTable};
pub use resolve::resolve_best_price;
pub use similarity::{JaroWinkler, MatchingBlocks, NameSimilarity};
pub use sink::{MemorySink, ReportSink, SinkError};
pub use table::RawTable;

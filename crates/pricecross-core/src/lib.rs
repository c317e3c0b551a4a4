//! Domain types and configuration for the pricecross comparison engine.
//!
//! Holds everything the reconciliation engine and its callers share:
//! retailers and the validated retailer set, cleaned listings, match
//! results with their confidence tiers, and the comparison configuration
//! (thresholds, aggregation policy, output mode) with env-var overrides.

pub mod compare_config;
pub mod config;
pub mod error;
pub mod listing;
pub mod match_result;
pub mod retailers;

pub use compare_config::{AggregationPolicy, CompareConfig, OutputMode, Thresholds};
pub use config::{load_compare_config, load_compare_config_from_env};
pub use error::ConfigError;
pub use listing::Listing;
pub use match_result::{MatchBasis, MatchResult, RetailerEntry, Tier};
pub use retailers::{load_retailers, Retailer, RetailerSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::retailers::Retailer;

/// How a group of listings was established as the same physical product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// Listings share an identical non-empty normalized code; code equality
    /// is treated as ground truth.
    ExactCode,
    /// Residual grouping scored by pairwise item-name similarity.
    FuzzyName,
}

impl std::fmt::Display for MatchBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchBasis::ExactCode => write!(f, "exact_code"),
            MatchBasis::FuzzyName => write!(f, "fuzzy_name"),
        }
    }
}

/// Confidence tier derived from the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Matched,
    WeakMatched,
    Unmatched,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Matched => write!(f, "matched"),
            Tier::WeakMatched => write!(f, "weak-matched"),
            Tier::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// One retailer's contribution to a match: the representative listing's
/// name, price, and URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerEntry {
    pub item_name: String,
    pub price: Option<Decimal>,
    pub source_url: Option<String>,
}

/// The reconciled outcome for one listing group in one comparison run.
///
/// Created once per group, immutable afterwards, and never persisted
/// beyond the output report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// The code key the group was formed under. Empty for groups of
    /// listings with no usable code.
    pub normalized_code: String,
    pub basis: MatchBasis,
    /// Certainty in `[0.0, 100.0]` that the grouped listings refer to the
    /// same physical product.
    pub confidence: f64,
    pub tier: Tier,
    /// Per-retailer fields in retailer-set declaration order; only
    /// retailers present in the group appear.
    pub entries: Vec<(Retailer, RetailerEntry)>,
    pub best_price: Option<Decimal>,
    pub best_retailer: Option<Retailer>,
}

impl MatchResult {
    /// Returns this retailer's entry, if it contributed to the group.
    #[must_use]
    pub fn entry_for(&self, retailer: &Retailer) -> Option<&RetailerEntry> {
        self.entries
            .iter()
            .find(|(r, _)| r == retailer)
            .map(|(_, e)| e)
    }

    /// Number of distinct retailers contributing to the match.
    #[must_use]
    pub fn retailer_count(&self) -> usize {
        self.entries.len()
    }
}

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How pairwise name similarities are collapsed into one group confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationPolicy {
    /// Best pairwise evidence wins. The long-form default.
    Max,
    /// Arithmetic mean of all pairwise similarities. The short-form default.
    Mean,
}

impl std::fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationPolicy::Max => write!(f, "max"),
            AggregationPolicy::Mean => write!(f, "mean"),
        }
    }
}

/// Output shaping mode: per-retailer wide tables or single-winner rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Long,
    Short,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Long => write!(f, "long"),
            OutputMode::Short => write!(f, "short"),
        }
    }
}

/// Confidence thresholds in `[0, 100]` separating the output tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or above: tier "matched". Defaults to 100, so only exact-code
    /// groups reach it.
    pub matched: f64,
    /// At or above (below `matched`): tier "weak-matched".
    pub weak: f64,
    /// At or above (below `weak`): tier "unmatched", still reported.
    /// Below: excluded from short-form output entirely; long-form reports
    /// it in the unmatched bucket.
    pub minimum: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            matched: 100.0,
            weak: 30.0,
            minimum: 10.0,
        }
    }
}

impl Thresholds {
    /// Validate range and ordering (`matched >= weak >= minimum`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any threshold is outside
    /// `[0, 100]` or the ordering is violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("matched", self.matched),
            ("weak", self.weak),
            ("minimum", self.minimum),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} threshold {value} is outside [0, 100]"
                )));
            }
        }
        if self.matched < self.weak || self.weak < self.minimum {
            return Err(ConfigError::Validation(format!(
                "thresholds must satisfy matched >= weak >= minimum, got {} >= {} >= {}",
                self.matched, self.weak, self.minimum
            )));
        }
        Ok(())
    }
}

/// Configuration for one comparison run, passed explicitly into the
/// pipeline entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    pub thresholds: Thresholds,
    pub aggregation: AggregationPolicy,
    pub output: OutputMode,
}

impl CompareConfig {
    /// Long-form preset: wide per-retailer tables, optimistic max
    /// aggregation.
    #[must_use]
    pub fn long_form() -> Self {
        Self {
            thresholds: Thresholds::default(),
            aggregation: AggregationPolicy::Max,
            output: OutputMode::Long,
        }
    }

    /// Short-form preset: collapsed winner rows, conservative mean
    /// aggregation.
    #[must_use]
    pub fn short_form() -> Self {
        Self {
            thresholds: Thresholds::default(),
            aggregation: AggregationPolicy::Mean,
            output: OutputMode::Short,
        }
    }
}

//! Match Classifier: assigns confidence, basis, and tier to each group.

use pricecross_core::{
    AggregationPolicy, CompareConfig, MatchBasis, MatchResult, OutputMode, RetailerEntry,
    RetailerSet, Tier,
};

use crate::group::{GroupedCategory, ListingGroup};
use crate::resolve::resolve_best_price;
use crate::similarity::NameSimilarity;

/// Classifies every surviving group of a category into [`MatchResult`]s.
///
/// Exact-code groups get confidence 100.0 with no name comparison; code
/// equality is ground truth. Fallback groups are scored by pairwise
/// item-name similarity across the distinct retailer pairs present,
/// aggregated per the configured policy and scaled to `[0, 100]`.
///
/// Groups scoring below the minimum threshold are dropped here in
/// short-form mode; long-form mode keeps them in the unmatched tier.
#[must_use]
pub fn classify_category<S: NameSimilarity>(
    grouped: GroupedCategory,
    retailers: &RetailerSet,
    config: &CompareConfig,
    similarity: &S,
) -> Vec<MatchResult> {
    let mut results = Vec::with_capacity(grouped.exact.len() + grouped.fallback.len());

    for group in grouped.exact {
        let confidence = 100.0;
        if let Some(tier) = tier_for(confidence, config) {
            results.push(build_result(
                &group,
                MatchBasis::ExactCode,
                confidence,
                tier,
                retailers,
            ));
        }
    }

    for group in grouped.fallback {
        let confidence = fallback_confidence(&group, retailers, config.aggregation, similarity);
        match tier_for(confidence, config) {
            Some(tier) => results.push(build_result(
                &group,
                MatchBasis::FuzzyName,
                confidence,
                tier,
                retailers,
            )),
            None => {
                tracing::debug!(
                    code = %group.normalized_code,
                    confidence,
                    "dropped below-minimum fallback group from short-form output"
                );
            }
        }
    }

    results
}

/// Confidence for a fallback group: pairwise similarity of the
/// representative item names over all distinct retailer combinations
/// present, aggregated and scaled to `[0, 100]`, rounded to 2 decimals.
///
/// Combinations (not permutations) make the score invariant to pair
/// iteration order.
fn fallback_confidence<S: NameSimilarity>(
    group: &ListingGroup,
    retailers: &RetailerSet,
    aggregation: AggregationPolicy,
    similarity: &S,
) -> f64 {
    let names: Vec<&str> = retailers
        .iter()
        .filter_map(|r| group.representative(r))
        .map(|l| l.item_name.as_str())
        .collect();

    let mut scores = Vec::new();
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            scores.push(similarity.ratio(names[i], names[j]));
        }
    }
    if scores.is_empty() {
        return 0.0;
    }

    let aggregated = match aggregation {
        AggregationPolicy::Max => scores.iter().copied().fold(f64::MIN, f64::max),
        AggregationPolicy::Mean => {
            #[allow(clippy::cast_precision_loss)]
            let denom = scores.len() as f64;
            scores.iter().sum::<f64>() / denom
        }
    };
    round2(aggregated * 100.0)
}

/// Tier for a confidence value, or `None` when the group is excluded from
/// output (below minimum in short-form mode only).
fn tier_for(confidence: f64, config: &CompareConfig) -> Option<Tier> {
    let t = &config.thresholds;
    if confidence >= t.matched {
        Some(Tier::Matched)
    } else if confidence >= t.weak {
        Some(Tier::WeakMatched)
    } else if confidence >= t.minimum {
        Some(Tier::Unmatched)
    } else {
        match config.output {
            OutputMode::Long => Some(Tier::Unmatched),
            OutputMode::Short => None,
        }
    }
}

fn build_result(
    group: &ListingGroup,
    basis: MatchBasis,
    confidence: f64,
    tier: Tier,
    retailers: &RetailerSet,
) -> MatchResult {
    let entries = retailers
        .iter()
        .filter_map(|retailer| {
            group.representative(retailer).map(|listing| {
                (
                    retailer.clone(),
                    RetailerEntry {
                        item_name: listing.item_name.clone(),
                        price: listing.price,
                        source_url: listing.source_url.clone(),
                    },
                )
            })
        })
        .collect();
    let (best_price, best_retailer) = resolve_best_price(group, retailers);

    MatchResult {
        normalized_code: group.normalized_code.clone(),
        basis,
        confidence,
        tier,
        entries,
        best_price,
        best_retailer,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

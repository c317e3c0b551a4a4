//! Pluggable item-name similarity measures for the fallback matcher.
//!
//! The measure in use directly shapes confidence values, so it must stay
//! pinned for reproducible runs: [`MatchingBlocks`] is the default and the
//! one every threshold in the default configuration was tuned against.

/// A normalized string-similarity measure.
pub trait NameSimilarity {
    /// Similarity of two already-cleaned item names in `[0.0, 1.0]`.
    ///
    /// Character order matters and comparison is case-sensitive; callers
    /// clean and casefold names upstream if they want otherwise.
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Character-level longest-matching-blocks ratio (Ratcliff/Obershelp).
///
/// Finds the longest common contiguous block, recurses on the pieces to
/// either side, and scores `2 * total_matched / (len_a + len_b)`. Two
/// empty strings score 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingBlocks;

impl NameSimilarity for MatchingBlocks {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = 2.0 * matched_chars(&a, &b) as f64 / total as f64;
        ratio
    }
}

/// Total characters covered by the recursive longest-block decomposition.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_chars(&a[..a_start], &b[..b_start])
        + matched_chars(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block between `a` and `b`, as
/// `(start_in_a, start_in_b, length)`. Earliest occurrence in `a` (then
/// `b`) wins ties, keeping the decomposition deterministic.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }
    best
}

/// Jaro-Winkler similarity backed by `strsim`.
///
/// Alternative measure; swapping it in changes confidence values, so the
/// chosen measure must be held constant across runs being compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl NameSimilarity for JaroWinkler {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}

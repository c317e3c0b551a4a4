//! Grouping Engine: partitions a category's listings by normalized code.
//!
//! Two passes. Pass 1 forms exact-code candidates from non-empty codes
//! spanning at least two retailers. Everything left over (single-retailer
//! code groups plus all listings with no usable code) is pooled and
//! re-grouped by the same code key in pass 2; groups that then span at
//! least two retailers take the fuzzy-name path, the rest are dropped as
//! unmatched-empty. `BTreeMap` keys make group order deterministic.

use std::collections::{BTreeMap, HashSet};

use pricecross_core::{Listing, Retailer};

/// Listings sharing one code key within a category.
#[derive(Debug, Clone)]
pub struct ListingGroup {
    pub normalized_code: String,
    /// Listings in input order; may contain several per retailer.
    pub listings: Vec<Listing>,
}

impl ListingGroup {
    /// Number of distinct retailers with at least one listing here.
    #[must_use]
    pub fn distinct_retailers(&self) -> usize {
        self.listings
            .iter()
            .map(|l| l.retailer.name())
            .collect::<HashSet<_>>()
            .len()
    }

    /// The retailer's representative listing: first by input order.
    #[must_use]
    pub fn representative(&self, retailer: &Retailer) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.retailer == retailer)
    }
}

/// Output of the two-pass grouping for one category.
#[derive(Debug, Default)]
pub struct GroupedCategory {
    /// Non-empty-code groups spanning >= 2 retailers; code equality is
    /// ground truth for these.
    pub exact: Vec<ListingGroup>,
    /// Residual groups spanning >= 2 retailers, to be scored by name
    /// similarity.
    pub fallback: Vec<ListingGroup>,
}

/// Partitions the unioned listings of one category.
#[must_use]
pub fn group_listings(listings: Vec<Listing>) -> GroupedCategory {
    let mut by_code: BTreeMap<String, Vec<Listing>> = BTreeMap::new();
    for listing in listings {
        by_code
            .entry(listing.normalized_code.clone())
            .or_default()
            .push(listing);
    }

    let mut exact = Vec::new();
    let mut leftovers: Vec<Listing> = Vec::new();

    for (code, members) in by_code {
        let group = ListingGroup {
            normalized_code: code,
            listings: members,
        };
        if group.normalized_code.is_empty() || group.distinct_retailers() < 2 {
            leftovers.extend(group.listings);
        } else {
            exact.push(group);
        }
    }

    // Second pass over the residual pool, keyed on the same code.
    let mut residual: BTreeMap<String, Vec<Listing>> = BTreeMap::new();
    for listing in leftovers {
        residual
            .entry(listing.normalized_code.clone())
            .or_default()
            .push(listing);
    }

    let mut fallback = Vec::new();
    let mut unmatched_empty = 0usize;
    for (code, members) in residual {
        let group = ListingGroup {
            normalized_code: code,
            listings: members,
        };
        if group.distinct_retailers() >= 2 {
            fallback.push(group);
        } else {
            unmatched_empty += 1;
        }
    }

    if unmatched_empty > 0 {
        tracing::debug!(
            groups = unmatched_empty,
            "dropped single-retailer residual groups"
        );
    }

    GroupedCategory { exact, fallback }
}

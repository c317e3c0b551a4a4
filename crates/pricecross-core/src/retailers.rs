use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A retailer participating in a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Retailer {
    name: String,
}

impl Retailer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate a URL-safe slug from the retailer name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl std::fmt::Display for Retailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The fixed, ordered set of retailers for one comparison run.
///
/// Declaration order is canonical: report columns are laid out in this
/// order and price ties resolve to the earliest retailer in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerSet {
    retailers: Vec<Retailer>,
}

impl RetailerSet {
    /// Build a validated retailer set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the set has fewer than two
    /// retailers, any name is empty, or two names collapse to the same slug.
    pub fn new(retailers: Vec<Retailer>) -> Result<Self, ConfigError> {
        if retailers.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "a comparison run needs at least 2 retailers, got {}",
                retailers.len()
            )));
        }

        let mut seen_slugs = HashSet::new();
        for retailer in &retailers {
            if retailer.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "retailer name must be non-empty".to_string(),
                ));
            }
            let slug = retailer.slug();
            if !seen_slugs.insert(slug.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate retailer slug: '{}' (from retailer '{}')",
                    slug, retailer.name
                )));
            }
        }

        Ok(Self { retailers })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Retailer> {
        self.retailers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.retailers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.retailers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, retailer: &Retailer) -> bool {
        self.retailers.contains(retailer)
    }

    /// Rank of a retailer in declaration order; used as the tie-break key.
    #[must_use]
    pub fn position(&self, retailer: &Retailer) -> Option<usize> {
        self.retailers.iter().position(|r| r == retailer)
    }
}

#[derive(Debug, Deserialize)]
struct RetailersFile {
    retailers: Vec<Retailer>,
}

/// Load and validate the retailer set from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_retailers(path: &Path) -> Result<RetailerSet, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RetailersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_retailers(&content)
}

fn parse_retailers(content: &str) -> Result<RetailerSet, ConfigError> {
    let file: RetailersFile = serde_yaml::from_str(content)?;
    RetailerSet::new(file.retailers)
}

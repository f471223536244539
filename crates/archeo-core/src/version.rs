//! Version tokens and candidate selection.
//!
//! The registry's own ordering is authoritative. A `Version` supports
//! exactly two comparisons: equality, and a prefix match against the
//! configured baseline. No semantic-version arithmetic is performed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque release identifier, as published by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Wrap a raw registry token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this version is at or above the baseline, by prefix match.
    #[must_use]
    pub fn matches_baseline(&self, baseline: &str) -> bool {
        self.0.starts_with(baseline)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Select the installable candidates from a registry listing.
///
/// Keeps registry order: every entry before the first one that starts with
/// the baseline is discarded, then versions whose branch already exists are
/// removed. When no entry matches the baseline, nothing is eligible.
#[must_use]
pub fn select_candidates(
    registry_order: Vec<Version>,
    baseline: &str,
    already_branched: &[String],
) -> Vec<Version> {
    let Some(first) = registry_order
        .iter()
        .position(|v| v.matches_baseline(baseline))
    else {
        return Vec::new();
    };

    registry_order
        .into_iter()
        .skip(first)
        .filter(|v| !already_branched.iter().any(|b| b == v.as_str()))
        .collect()
}

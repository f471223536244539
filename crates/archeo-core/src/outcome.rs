//! Per-version install outcomes and the end-of-run summary.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Classification of a single install attempt.
///
/// Decided solely by whether the version's install directory exists once
/// the timeout race resolves; the child's exit status is never consulted.
/// A failed install is never retried within a run; its missing branch
/// makes it a candidate again on the next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallOutcome {
    /// The install directory exists on disk.
    Succeeded,
    /// The directory was absent when the decision fired.
    Failed,
}

impl InstallOutcome {
    /// Derive the outcome from the observed existence of the install dir.
    #[must_use]
    pub fn from_dir_exists(exists: bool) -> Self {
        if exists {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    /// Whether the install produced a usable tree.
    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Branch names skipped because they already existed before the run.
    pub already_branched: Vec<String>,
    /// Versions selected for install this run, in registry order.
    pub candidates: Vec<Version>,
    /// Versions that ended up on their own branch.
    pub branched: Vec<Version>,
}

impl RunSummary {
    /// Candidates that did not make it to a branch (failed install or
    /// failed materialization).
    #[must_use]
    pub fn unbranched(&self) -> usize {
        self.candidates.len() - self.branched.len()
    }
}

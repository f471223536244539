//! Version discovery and filtering.
//!
//! Combines the registry listing with the repository's local branches:
//! a version whose branch already exists counts as installed and is never
//! a candidate again, which is what makes re-runs idempotent.

use crate::error::CatalogError;
use crate::git::Git;
use crate::registry::Registry;
use archeo_core::{select_candidates, ArchiveConfig, Version};

/// What discovery produced.
#[derive(Debug, Clone)]
pub struct CatalogSelection {
    /// Versions this run must install, in registry order.
    pub candidates: Vec<Version>,
    /// Branch names skipped because they already existed.
    pub already_branched: Vec<String>,
}

/// Filters registry releases down to the versions this run must install.
pub struct VersionCatalog {
    config: ArchiveConfig,
    registry: Registry,
    git: Git,
}

impl VersionCatalog {
    /// Build a catalog over the configured registry command and repository.
    pub fn new(config: ArchiveConfig, git: Git) -> Self {
        Self {
            registry: Registry::new(config.registry_command.clone()),
            config,
            git,
        }
    }

    /// Resolve the candidate set: registry order, baseline-filtered, minus
    /// versions already materialized as branches. Any failure here is fatal
    /// to the run.
    pub async fn candidates(&self) -> Result<CatalogSelection, CatalogError> {
        self.git.checkout(&self.config.base_branch).await?;

        let already_branched: Vec<String> = self
            .git
            .local_branches()
            .await?
            .into_iter()
            .filter(|name| name != &self.config.base_branch)
            .collect();
        if !already_branched.is_empty() {
            tracing::info!(
                "Skipping already installed versions: {}",
                already_branched.join(", ")
            );
        }

        let versions = self.registry.list_versions().await?;
        let candidates = select_candidates(versions, &self.config.min_version, &already_branched);

        Ok(CatalogSelection {
            candidates,
            already_branched,
        })
    }
}

//! End-to-end archive run.
//!
//! The pipeline expects the base branch to carry an ignore rule for the
//! workspace directory, so that staged version branches never pick up
//! in-flight install trees.

use crate::catalog::VersionCatalog;
use crate::error::KernelError;
use crate::git::Git;
use crate::install::InstallOrchestrator;
use crate::materialize::BranchMaterializer;
use crate::workspace::Workspace;
use archeo_core::{ArchiveConfig, RunSummary};
use std::path::PathBuf;

/// Wires discovery, installation, and materialization over one repository.
pub struct ArchivePipeline {
    config: ArchiveConfig,
    repo_root: PathBuf,
}

impl ArchivePipeline {
    /// Bind a configuration to a repository root.
    pub fn new(config: ArchiveConfig, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            repo_root: repo_root.into(),
        }
    }

    /// One full run: discover, install, materialize, return to base.
    ///
    /// Per-version failures are absorbed along the way; only configuration,
    /// discovery, workspace-reset, and final-checkout failures abort.
    pub async fn run(&self) -> Result<RunSummary, KernelError> {
        self.config.validate()?;

        let git = Git::new(&self.repo_root);
        let workspace = Workspace::new(&self.repo_root, &self.config.workdir_name);

        let catalog = VersionCatalog::new(self.config.clone(), git.clone());
        let selection = catalog.candidates().await?;

        // The workspace is wiped every run, even when there is nothing to
        // install, so no state survives across runs.
        workspace.reset().map_err(KernelError::Workspace)?;

        if selection.candidates.is_empty() {
            tracing::info!("Nothing to install: every eligible version already has a branch");
            return Ok(RunSummary {
                already_branched: selection.already_branched,
                ..RunSummary::default()
            });
        }

        let orchestrator = InstallOrchestrator::new(self.config.clone(), workspace.clone());
        orchestrator.install_all(&selection.candidates).await;

        let materializer = BranchMaterializer::new(self.config.clone(), git, workspace);
        let branched = materializer.materialize(&selection.candidates).await?;

        let summary = RunSummary {
            already_branched: selection.already_branched,
            candidates: selection.candidates,
            branched,
        };
        tracing::info!(
            "Run complete: {} branched, {} not branched, {} skipped as existing",
            summary.branched.len(),
            summary.unbranched(),
            summary.already_branched.len()
        );
        Ok(summary)
    }
}

//! Branch materialization.
//!
//! Converts each captured install tree into a committed, version-named
//! branch. Strictly sequential: the repository working tree is a
//! single-writer resource, touched only after the install fan-out has
//! fully resolved. Branches are recreated every run (a stale branch of
//! the same name is deleted first), so materialization is idempotent with
//! respect to content.

use crate::error::{GitError, MaterializeError};
use crate::git::Git;
use crate::workspace::Workspace;
use archeo_core::{ArchiveConfig, Version};
use std::fs;
use std::io;
use std::path::Path;

/// Commits captured install trees to dedicated branches.
pub struct BranchMaterializer {
    config: ArchiveConfig,
    git: Git,
    workspace: Workspace,
}

impl BranchMaterializer {
    /// Bind the materializer to its repository and workspace.
    pub fn new(config: ArchiveConfig, git: Git, workspace: Workspace) -> Self {
        Self {
            config,
            git,
            workspace,
        }
    }

    /// Create one branch per version whose install directory survived
    /// orchestration; versions without one are skipped silently. Failures
    /// are isolated per version. Afterwards the base branch is checked out
    /// unconditionally; only that final checkout can fail the call.
    pub async fn materialize(&self, versions: &[Version]) -> Result<Vec<Version>, GitError> {
        tracing::info!("Moving each captured install tree to a dedicated branch");

        let mut branched = Vec::new();
        for version in versions {
            if !self.workspace.is_installed(version) {
                continue;
            }
            match self.materialize_one(version).await {
                Ok(()) => branched.push(version.clone()),
                Err(err) => tracing::error!("Failed to materialize {}: {}", version, err),
            }
        }

        self.git.checkout(&self.config.base_branch).await?;
        Ok(branched)
    }

    async fn materialize_one(&self, version: &Version) -> Result<(), MaterializeError> {
        tracing::info!("Creating branch for {}", version);

        self.git.checkout(&self.config.base_branch).await?;
        // Stale branch from an earlier run; absence is the common case.
        self.git.delete_branch(version.as_str()).await?;
        self.git.checkout_new(version.as_str()).await?;

        let copied =
            copy_tree_contents(&self.workspace.version_dir(version), self.git.repo_root())?;
        tracing::info!("Copied {} entries to the repository root", copied);

        self.git.add_all().await?;
        self.git
            .commit(&format!("Init version {version}"))
            .await?;

        self.workspace.discard(version)?;
        Ok(())
    }
}

/// Files that carry ignore rules never enter a version branch; this also
/// keeps the repository's own root `.gitignore` intact across the copy.
fn is_ignore_rule_file(name: &str) -> bool {
    name == ".gitignore"
}

/// Copy the contents of `src` into `dst`, excluding ignore-rule files at
/// any depth, preserving structure and overwriting existing files. Returns
/// the number of top-level entries considered.
fn copy_tree_contents(src: &Path, dst: &Path) -> io::Result<usize> {
    let mut entries = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
        entries += 1;
    }
    Ok(entries)
}

fn copy_entry(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(name) = src.file_name().and_then(|n| n.to_str()) {
        if is_ignore_rule_file(name) {
            return Ok(());
        }
    }
    if src.is_dir() {
        fs::create_dir_all(dst)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
        }
    } else {
        fs::copy(src, dst)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_preserves_structure_and_skips_ignore_files() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        fs::write(src.path().join("package.json"), "{}").unwrap();
        fs::write(src.path().join(".gitignore"), "node_modules").unwrap();
        fs::create_dir_all(src.path().join("src/api")).unwrap();
        fs::write(src.path().join("src/api/index.js"), "ok").unwrap();
        fs::write(src.path().join("src/.gitignore"), "dist").unwrap();

        let entries = copy_tree_contents(src.path(), dst.path()).unwrap();

        // Top-level entries considered, including the skipped ignore file.
        assert_eq!(entries, 3);
        assert!(dst.path().join("package.json").exists());
        assert!(dst.path().join("src/api/index.js").exists());
        assert!(!dst.path().join(".gitignore").exists());
        assert!(!dst.path().join("src/.gitignore").exists());
    }

    #[test]
    fn copy_overwrites_existing_files() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        fs::write(src.path().join("README.md"), "new contents").unwrap();
        fs::write(dst.path().join("README.md"), "old contents").unwrap();

        copy_tree_contents(src.path(), dst.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dst.path().join("README.md")).unwrap(),
            "new contents"
        );
    }
}

//! Git driven as an external command executor.
//!
//! The repository working tree and the checked-out branch are single-writer
//! resources: only discovery (branch listing) and materialization go
//! through here, strictly sequentially, never interleaved with the install
//! fan-out.

use crate::error::GitError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Runs git subcommands with the repository root as working directory.
#[derive(Debug, Clone)]
pub struct Git {
    repo_root: PathBuf,
}

impl Git {
    /// Bind the executor to a repository root.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// The bound repository root.
    #[inline]
    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run one git subcommand and capture stdout. A non-zero exit becomes
    /// an error carrying the subcommand and its stderr.
    pub async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let rendered = args.join(" ");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Io {
                args: rendered.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                args: rendered,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Name of the currently checked-out branch.
    pub async fn current_branch(&self) -> Result<String, GitError> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .await?
            .trim()
            .to_string())
    }

    /// Switch to an existing branch.
    pub async fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).await.map(drop)
    }

    /// Create a branch at HEAD and switch to it.
    pub async fn checkout_new(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", "-b", branch]).await.map(drop)
    }

    /// Force-delete a branch, returning whether it existed. A missing
    /// branch is expected (first materialization of a version); every other
    /// failure propagates.
    pub async fn delete_branch(&self, branch: &str) -> Result<bool, GitError> {
        match self.run(&["branch", "-D", branch]).await {
            Ok(_) => Ok(true),
            Err(GitError::Failed { ref stderr, .. }) if stderr.contains("not found") => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Local branch names, with the checked-out-branch marker stripped.
    pub async fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let listing = self.run(&["branch"]).await?;
        Ok(parse_branch_listing(&listing))
    }

    /// Stage every change in the working tree.
    pub async fn add_all(&self) -> Result<(), GitError> {
        self.run(&["add", "-A"]).await.map(drop)
    }

    /// Commit staged changes.
    pub async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).await.map(drop)
    }
}

/// Parse `git branch` output into bare branch names.
fn parse_branch_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| line.trim().trim_start_matches("* ").trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn branch_listing_strips_the_checkout_marker() {
        let listing = "  4.4.0\n* master\n  4.4.1\n";
        assert_eq!(
            parse_branch_listing(listing),
            vec!["4.4.0".to_string(), "master".to_string(), "4.4.1".to_string()]
        );
    }

    #[test]
    fn empty_listing_parses_to_nothing() {
        assert!(parse_branch_listing("").is_empty());
        assert!(parse_branch_listing("\n\n").is_empty());
    }
}

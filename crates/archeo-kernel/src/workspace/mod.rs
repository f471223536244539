//! Ephemeral install workspace.
//!
//! One root directory holds one subdirectory per in-flight install, named
//! by version so concurrent installs never collide. The root is destroyed
//! and recreated at the start of every run; nothing under it survives
//! between runs except what materialization already committed.

use archeo_core::Version;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Root directory for all in-flight installs of a run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Place the workspace under the repository root.
    pub fn new(repo_root: &Path, name: &str) -> Self {
        Self {
            root: repo_root.join(name),
        }
    }

    /// The workspace root directory.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destructive reset: recursively delete any pre-existing root
    /// (tolerating absence), then recreate it empty.
    pub fn reset(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        fs::create_dir_all(&self.root)
    }

    /// Install directory owned exclusively by one version's task.
    #[must_use]
    pub fn version_dir(&self, version: &Version) -> PathBuf {
        self.root.join(version.as_str())
    }

    /// Whether the version's install directory exists on disk.
    #[must_use]
    pub fn is_installed(&self, version: &Version) -> bool {
        self.version_dir(version).exists()
    }

    /// Drop a version's install directory to reclaim space. Absence is
    /// fine; a failed install never created one.
    pub fn discard(&self, version: &Version) -> io::Result<()> {
        match fs::remove_dir_all(self.version_dir(version)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

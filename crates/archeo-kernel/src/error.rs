//! Error layers for the archive pipeline.
//!
//! Fatal errors (registry, discovery, workspace reset) abort the run with
//! no partial materialization. Per-version failures never appear here:
//! failed installs collapse into a `Failed` outcome, and materialization
//! failures are absorbed per version inside the loop.

/// Failure running or parsing the registry listing. Always fatal; a
/// partial version list is never usable.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry command could not be spawned or awaited.
    #[error("registry command failed to run: {0}")]
    Io(#[from] std::io::Error),

    /// The command ran but reported failure.
    #[error("registry command exited unsuccessfully: {stderr}")]
    CommandFailed {
        /// Captured stderr of the failed command.
        stderr: String,
    },

    /// The listing was not a JSON-like array of version strings.
    #[error("unparseable registry listing: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A git invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The git binary could not be spawned or awaited.
    #[error("failed to run `git {args}`: {source}")]
    Io {
        /// The subcommand that was attempted.
        args: String,
        /// The underlying spawn/wait error.
        source: std::io::Error,
    },

    /// git exited non-zero.
    #[error("`git {args}` failed: {stderr}")]
    Failed {
        /// The subcommand that was attempted.
        args: String,
        /// Captured stderr.
        stderr: String,
    },
}

/// Fatal failure during version discovery.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Registry query or parse failure.
    #[error("registry query failed: {0}")]
    Registry(#[from] RegistryError),

    /// git failed while returning to base or listing branches.
    #[error("branch listing failed: {0}")]
    Git(#[from] GitError),
}

/// Failure materializing a single version. Isolated to that version: the
/// loop logs it and continues with the next one.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    /// A git step (checkout, branch, stage, commit) failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Copying the install tree or discarding the workdir failed.
    #[error("filesystem error while staging the install tree: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level pipeline failure. Anything surfacing here aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// The configuration was rejected before any side effect.
    #[error("configuration error: {0}")]
    Config(#[from] archeo_core::ConfigError),

    /// Version discovery failed.
    #[error("version discovery failed: {0}")]
    Catalog(#[from] CatalogError),

    /// An unrecoverable git failure outside the per-version loop, such as
    /// the final return to the base branch.
    #[error(transparent)]
    Git(#[from] GitError),

    /// The ephemeral workspace could not be wiped and recreated.
    #[error("workspace reset failed: {0}")]
    Workspace(#[source] std::io::Error),
}

//! Error types for archeo-core.

/// Configuration rejected before any side effect runs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Batches must hold at least one install.
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    /// The baseline filter needs a non-empty prefix.
    #[error("minimum version baseline is empty")]
    EmptyBaseline,

    /// The run cannot return to a nameless branch.
    #[error("base branch name is empty")]
    EmptyBaseBranch,

    /// The generator command has nowhere to put the version token.
    #[error("generator command is missing the {{version}} placeholder")]
    MissingVersionPlaceholder,
}

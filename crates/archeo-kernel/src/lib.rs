//! Archeo kernel: install orchestration and branch materialization.
//!
//! One run moves through three stages:
//! 1. **Discovery**: `VersionCatalog` filters registry releases to versions
//!    at or above the baseline with no existing branch.
//! 2. **Install**: `InstallOrchestrator` fans the generator out in
//!    sequential batches of concurrent, timeout-bounded child processes,
//!    capturing each install tree under the ephemeral workspace.
//! 3. **Materialize**: `BranchMaterializer` commits each captured tree to
//!    its own version-named branch and returns the repository to the base
//!    branch.
//!
//! The registry, the generator, and git itself are opaque external
//! commands; everything here is orchestration around them.

pub mod catalog;
pub mod error;
pub mod git;
pub mod install;
pub mod materialize;
pub mod pipeline;
pub mod registry;
pub mod workspace;

pub use catalog::{CatalogSelection, VersionCatalog};
pub use error::{CatalogError, GitError, KernelError, MaterializeError, RegistryError};
pub use git::Git;
pub use install::InstallOrchestrator;
pub use materialize::BranchMaterializer;
pub use pipeline::ArchivePipeline;
pub use registry::Registry;
pub use workspace::Workspace;

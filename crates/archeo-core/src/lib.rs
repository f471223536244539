//! Archeo domain types.
//!
//! Pure logic shared by the archive pipeline:
//! - `Version` tokens and candidate selection in registry order
//! - batch partitioning for the install fan-out
//! - per-version install outcomes and the end-of-run summary
//! - the run configuration surface
//!
//! Everything that touches a process, the filesystem, or git lives in
//! `archeo-kernel`; this crate performs no I/O.

pub mod batch;
pub mod config;
pub mod error;
pub mod outcome;
pub mod version;

pub use config::{debug_from_env, ArchiveConfig, VERSION_PLACEHOLDER};
pub use error::ConfigError;
pub use outcome::{InstallOutcome, RunSummary};
pub use version::{select_candidates, Version};

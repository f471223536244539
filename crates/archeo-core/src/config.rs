//! Run configuration.
//!
//! Every constant the pipeline depends on lives here and is passed in
//! explicitly, never read as ambient state, so tests can run with tiny
//! batches and short timeouts.

use crate::error::ConfigError;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder substituted with the version token in the generator command.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Configuration surface for one archive run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Shell command that prints the registry's full version listing.
    pub registry_command: String,
    /// Shell command template for one install; must contain `{version}`.
    /// Interactive prompts are expected to be pre-answered by the template
    /// itself (the default pipes `yes` into the generator).
    pub generator_command: String,
    /// Minimum version baseline, inclusive by prefix match.
    pub min_version: String,
    /// Neutral branch the run starts from and returns to.
    pub base_branch: String,
    /// Maximum number of concurrent installs per batch.
    pub batch_size: usize,
    /// Wall-clock bound for a single install.
    pub install_timeout: Duration,
    /// Name of the ephemeral workspace directory under the repo root.
    pub workdir_name: String,
    /// Directory names pruned from a successful install before commit.
    pub prune_dirs: Vec<String>,
    /// Surface captured process output for failed installs.
    pub debug: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            registry_command: "npm view create-strapi-app versions".to_string(),
            generator_command: "yes | npx create-strapi-app@{version} {version} --quickstart"
                .to_string(),
            min_version: "4.4.0".to_string(),
            base_branch: "master".to_string(),
            batch_size: 12,
            install_timeout: Duration::from_millis(15_000),
            workdir_name: "workdir".to_string(),
            prune_dirs: vec!["node_modules".to_string()],
            debug: debug_from_env(),
        }
    }
}

impl ArchiveConfig {
    /// Reject configurations the pipeline cannot run with. Called before
    /// any side effect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.min_version.trim().is_empty() {
            return Err(ConfigError::EmptyBaseline);
        }
        if self.base_branch.trim().is_empty() {
            return Err(ConfigError::EmptyBaseBranch);
        }
        if !self.generator_command.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::MissingVersionPlaceholder);
        }
        Ok(())
    }

    /// Render the generator command for one version.
    #[must_use]
    pub fn render_generator_command(&self, version: &Version) -> String {
        self.generator_command
            .replace(VERSION_PLACEHOLDER, version.as_str())
    }
}

/// Verbosity toggle read from the process environment; the CLI flag can
/// still force it on.
#[must_use]
pub fn debug_from_env() -> bool {
    std::env::var_os("DEBUG").is_some_and(|value| !value.is_empty())
}

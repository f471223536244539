//! Registry queries.
//!
//! The registry is an opaque shell command printing a JSON-like,
//! single-quoted listing of published versions (the `npm view … versions`
//! format). The payload is normalized to JSON before parsing; there is no
//! other interpretation of its contents.

use crate::error::RegistryError;
use archeo_core::Version;
use std::process::Stdio;
use tokio::process::Command;

/// Client for the configured registry listing command.
#[derive(Debug, Clone)]
pub struct Registry {
    command: String,
}

impl Registry {
    /// Wrap the listing command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The full published version list, in registry order. Fatal on command
    /// or parse failure; a partial listing is never usable.
    pub async fn list_versions(&self) -> Result<Vec<Version>, RegistryError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(RegistryError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let versions = serde_json::from_str(&normalize_listing(&raw))?;
        Ok(versions)
    }
}

/// The npm listing quotes entries with single quotes; JSON wants double.
fn normalize_listing(raw: &str) -> String {
    raw.replace('\'', "\"")
}

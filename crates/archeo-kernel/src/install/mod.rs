//! Concurrent batched install orchestration.
//!
//! Batches run strictly sequentially; installs inside a batch run
//! concurrently, each isolated to its own version-named subdirectory of the
//! workspace. Success is decided by filesystem observation, never exit
//! status: when the timeout race resolves, the install directory either
//! exists or it does not.
//!
//! A slow install that would have finished after the deadline is
//! indistinguishable from a genuine failure and is discarded; its missing
//! branch makes it a candidate again on the next run.

use crate::workspace::Workspace;
use archeo_core::{batch, ArchiveConfig, InstallOutcome, Version};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time;

/// Fans generator runs out per batch and leaves outcomes on disk.
pub struct InstallOrchestrator {
    config: ArchiveConfig,
    workspace: Workspace,
}

/// How one bounded child run resolved.
#[derive(Debug)]
enum RaceVerdict {
    /// The process finished before the deadline.
    Exited(std::process::Output),
    /// The deadline fired first; the child has been killed.
    TimedOut,
    /// The child never started or could not be awaited.
    SpawnFailed(std::io::Error),
}

impl InstallOrchestrator {
    /// Bind the orchestrator to its configuration and workspace.
    pub fn new(config: ArchiveConfig, workspace: Workspace) -> Self {
        Self { config, workspace }
    }

    /// Install every version, batch by batch. Yields no result object:
    /// success is observable as `workdir/<version>` existing afterwards,
    /// which the materializer re-derives.
    pub async fn install_all(&self, versions: &[Version]) {
        if versions.is_empty() {
            return;
        }
        tracing::info!("Selected for install: {}", join_versions(versions));

        let batches = batch::partition(versions.to_vec(), self.config.batch_size);
        tracing::info!("Installing {} batches", batches.len());

        for batch in batches {
            let installs = batch.iter().map(|version| self.install_one(version));
            futures::future::join_all(installs).await;
        }
    }

    /// One bounded install. Infallible by design: every failure mode
    /// collapses into a `Failed` outcome, never an error.
    async fn install_one(&self, version: &Version) -> InstallOutcome {
        tracing::info!("Installing {}", version);

        let command = self.config.render_generator_command(version);
        let verdict =
            run_bounded(&command, self.workspace.root(), self.config.install_timeout).await;

        let outcome = InstallOutcome::from_dir_exists(self.workspace.is_installed(version));
        match outcome {
            InstallOutcome::Succeeded => {
                self.prune_artifacts(version);
                tracing::info!("Successfully installed {}", version);
            }
            InstallOutcome::Failed => self.report_failure(version, &verdict),
        }
        outcome
    }

    /// Heavy, reproducible dependency artifacts are dropped as soon as the
    /// install is known good, bounding disk usage before materialization.
    fn prune_artifacts(&self, version: &Version) {
        let dir = self.workspace.version_dir(version);
        for name in &self.config.prune_dirs {
            match std::fs::remove_dir_all(dir.join(name)) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => tracing::warn!("Could not prune {} for {}: {}", name, version, err),
            }
        }
    }

    /// Failures report only the version unless the verbosity toggle is on.
    fn report_failure(&self, version: &Version, verdict: &RaceVerdict) {
        tracing::warn!("Errors during installation for {}", version);
        if !self.config.debug {
            return;
        }
        match verdict {
            RaceVerdict::TimedOut => {
                tracing::warn!("{}: timed out with no install directory", version);
            }
            RaceVerdict::Exited(output) => {
                tracing::warn!(
                    "{}: exit {:?}, stdout: {}, stderr: {}",
                    version,
                    output.status.code(),
                    String::from_utf8_lossy(&output.stdout).trim(),
                    String::from_utf8_lossy(&output.stderr).trim(),
                );
            }
            RaceVerdict::SpawnFailed(err) => {
                tracing::warn!("{}: generator process error: {}", version, err);
            }
        }
    }
}

/// Race one generator child against an independent deadline.
///
/// The select is biased so that on a tie the deadline wins, which keeps the
/// decision deterministic. Whichever side resolves, the child is
/// terminated: `kill_on_drop` covers the timeout arm, where dropping the
/// in-flight wait future drops the child with it.
async fn run_bounded(command: &str, workdir: &Path, timeout: Duration) -> RaceVerdict {
    let spawned = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match spawned {
        Ok(child) => child,
        Err(err) => return RaceVerdict::SpawnFailed(err),
    };

    tokio::select! {
        biased;
        _ = time::sleep(timeout) => RaceVerdict::TimedOut,
        result = child.wait_with_output() => match result {
            Ok(output) => RaceVerdict::Exited(output),
            Err(err) => RaceVerdict::SpawnFailed(err),
        },
    }
}

fn join_versions(versions: &[Version]) -> String {
    versions
        .iter()
        .map(Version::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

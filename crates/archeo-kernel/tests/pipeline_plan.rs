//! End-to-end archive runs against a throwaway repository.
//!
//! Mirrors the canonical example: the registry publishes
//! `["4.3.9","4.4.0","4.4.1","4.5.0"]`, the baseline is `4.4.0`, and the
//! batch bound exceeds the candidate count, so one batch of three installs
//! runs concurrently and each success becomes a branch.

mod common;

use archeo_core::{ArchiveConfig, Version};
use archeo_kernel::ArchivePipeline;
use pretty_assertions::assert_eq;
use std::fs;
use std::time::Duration;

const LISTING: &str = r#"echo "[ '4.3.9', '4.4.0', '4.4.1', '4.5.0' ]""#;

fn pipeline_config(base_branch: &str, generator_command: &str) -> ArchiveConfig {
    ArchiveConfig {
        base_branch: base_branch.to_string(),
        registry_command: LISTING.to_string(),
        generator_command: generator_command.to_string(),
        min_version: "4.4.0".to_string(),
        install_timeout: Duration::from_secs(10),
        debug: false,
        ..ArchiveConfig::default()
    }
}

const GENERATOR: &str = "mkdir -p {version} \
    && echo app-{version} > {version}/app.txt \
    && echo node_modules > {version}/.gitignore";

/// Tenet: a clean run branches every candidate and ends on the base branch.
#[tokio::test]
async fn full_run_branches_every_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let (git, base) = common::init_repo(dir.path()).await;

    let pipeline = ArchivePipeline::new(pipeline_config(&base, GENERATOR), dir.path());
    let summary = pipeline.run().await.unwrap();

    assert_eq!(
        summary.candidates,
        vec![
            Version::from("4.4.0"),
            Version::from("4.4.1"),
            Version::from("4.5.0"),
        ]
    );
    assert_eq!(summary.branched, summary.candidates);
    assert!(summary.already_branched.is_empty());
    assert_eq!(git.current_branch().await.unwrap(), base);

    // Each branch carries its own install tree, minus ignore-rule files.
    git.checkout("4.4.1").await.unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("app.txt")).unwrap().trim(),
        "app-4.4.1"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
        "workdir\n"
    );
    git.checkout(&base).await.unwrap();
}

/// Tenet: a failed install is isolated. The other versions still branch,
/// no branch appears for the failure, and the run ends on base.
#[tokio::test]
async fn failed_install_is_isolated_per_version() {
    let dir = tempfile::tempdir().unwrap();
    let (git, base) = common::init_repo(dir.path()).await;

    // The generator refuses exactly one version and scaffolds the rest.
    let generator = "test {version} != 4.4.1 \
        && mkdir -p {version} \
        && echo app-{version} > {version}/app.txt";
    let pipeline = ArchivePipeline::new(pipeline_config(&base, generator), dir.path());
    let summary = pipeline.run().await.unwrap();

    assert_eq!(
        summary.branched,
        vec![Version::from("4.4.0"), Version::from("4.5.0")]
    );
    assert_eq!(summary.unbranched(), 1);

    let branches = git.local_branches().await.unwrap();
    assert!(!branches.contains(&"4.4.1".to_string()));
    assert_eq!(git.current_branch().await.unwrap(), base);
}

/// Tenet: re-running with an unchanged registry response is a no-op; the
/// already-branched versions are filtered out of the candidate set.
#[tokio::test]
async fn rerun_with_unchanged_registry_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (git, base) = common::init_repo(dir.path()).await;

    let first = ArchivePipeline::new(pipeline_config(&base, GENERATOR), dir.path());
    let first_summary = first.run().await.unwrap();
    assert_eq!(first_summary.branched.len(), 3);

    let second = ArchivePipeline::new(pipeline_config(&base, GENERATOR), dir.path());
    let second_summary = second.run().await.unwrap();

    assert!(second_summary.candidates.is_empty());
    assert!(second_summary.branched.is_empty());
    let mut skipped = second_summary.already_branched.clone();
    skipped.sort();
    assert_eq!(
        skipped,
        vec!["4.4.0".to_string(), "4.4.1".to_string(), "4.5.0".to_string()]
    );
    assert_eq!(git.current_branch().await.unwrap(), base);
}

/// Tenet: when every install times out, the run still completes cleanly
/// with zero branches and the base branch checked out.
#[tokio::test]
async fn universal_timeout_produces_no_branches() {
    let dir = tempfile::tempdir().unwrap();
    let (git, base) = common::init_repo(dir.path()).await;

    let mut config = pipeline_config(&base, "sleep 30 # {version}");
    config.install_timeout = Duration::from_millis(300);
    let pipeline = ArchivePipeline::new(config, dir.path());
    let summary = pipeline.run().await.unwrap();

    assert_eq!(summary.candidates.len(), 3);
    assert!(summary.branched.is_empty());
    assert_eq!(git.current_branch().await.unwrap(), base);

    let branches = git.local_branches().await.unwrap();
    assert_eq!(branches, vec![base]);
}

/// Tenet: an invalid configuration aborts before any side effect.
#[tokio::test]
async fn invalid_config_aborts_before_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let (_git, base) = common::init_repo(dir.path()).await;

    let mut config = pipeline_config(&base, GENERATOR);
    config.batch_size = 0;
    let pipeline = ArchivePipeline::new(config, dir.path());
    assert!(pipeline.run().await.is_err());

    // The workspace was never created.
    assert!(!dir.path().join("workdir").exists());
}

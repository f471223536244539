//! Shared fixtures: throwaway git repositories for functional tests.
#![allow(dead_code)]

use archeo_core::Version;
use archeo_kernel::{Git, Workspace};
use std::fs;
use std::path::Path;

/// Initialize a commit-ready repository at `root`, with an ignore rule for
/// the workspace directory (the base branch is expected to carry one, as
/// the archived repository does). Returns the executor and the repo's own
/// base branch name, whatever the local git defaults call it.
pub async fn init_repo(root: &Path) -> (Git, String) {
    let git = Git::new(root);
    git.run(&["init"]).await.unwrap();
    git.run(&["config", "user.email", "archeo@example.com"])
        .await
        .unwrap();
    git.run(&["config", "user.name", "Archeo Tests"]).await.unwrap();
    git.run(&["config", "commit.gpgsign", "false"]).await.unwrap();

    fs::write(root.join(".gitignore"), "workdir\n").unwrap();
    fs::write(root.join("README.md"), "version archive\n").unwrap();
    git.add_all().await.unwrap();
    git.commit("Initial commit").await.unwrap();

    let base = git.current_branch().await.unwrap();
    (git, base)
}

/// Stage a minimal install tree for `version`, the shape the generator
/// would leave behind: a manifest, a source file, and its own ignore file.
pub fn stage_install(workspace: &Workspace, version: &Version) {
    let dir = workspace.version_dir(version);
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(
        dir.join("package.json"),
        format!("{{ \"version\": \"{version}\" }}\n"),
    )
    .unwrap();
    fs::write(dir.join("src/index.js"), "console.log('app')\n").unwrap();
    fs::write(dir.join(".gitignore"), "node_modules\n").unwrap();
}

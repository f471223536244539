//! `archeo`: archive every release of a scaffold generator as a git branch.

use anyhow::Context;
use archeo_core::{debug_from_env, ArchiveConfig};
use archeo_kernel::ArchivePipeline;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Command::new("archeo")
        .version("0.1.0")
        .about("Builds a historical corpus of scaffold-generator output: one git branch per release")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("update")
                .about("Install missing releases and materialize their branches")
                .arg(
                    Arg::new("repo-root")
                        .long("repo-root")
                        .value_parser(value_parser!(PathBuf))
                        .help("Target repository (defaults to the current directory)"),
                )
                .arg(
                    Arg::new("min-version")
                        .long("min-version")
                        .default_value("4.4.0")
                        .help("Minimum version baseline, inclusive by prefix match"),
                )
                .arg(
                    Arg::new("batch-size")
                        .long("batch-size")
                        .default_value("12")
                        .value_parser(value_parser!(usize))
                        .help("Number of installs run concurrently per batch"),
                )
                .arg(
                    Arg::new("timeout-ms")
                        .long("timeout-ms")
                        .default_value("15000")
                        .value_parser(value_parser!(u64))
                        .help("Wall-clock bound for a single install, in milliseconds"),
                )
                .arg(
                    Arg::new("base-branch")
                        .long("base-branch")
                        .default_value("master")
                        .help("Neutral branch the run starts from and returns to"),
                )
                .arg(
                    Arg::new("registry-command")
                        .long("registry-command")
                        .help("Override the shell command that lists published versions"),
                )
                .arg(
                    Arg::new("generator-command")
                        .long("generator-command")
                        .help("Override the install command template ({version} placeholder)"),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .action(ArgAction::SetTrue)
                        .help("Surface captured generator output for failed installs"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("update", args)) => {
            let repo_root = match args.get_one::<PathBuf>("repo-root") {
                Some(path) => path.clone(),
                None => std::env::current_dir().context("cannot resolve the repository root")?,
            };

            let mut config = ArchiveConfig {
                min_version: args.get_one::<String>("min-version").unwrap().clone(),
                batch_size: *args.get_one::<usize>("batch-size").unwrap(),
                install_timeout: Duration::from_millis(*args.get_one::<u64>("timeout-ms").unwrap()),
                base_branch: args.get_one::<String>("base-branch").unwrap().clone(),
                debug: args.get_flag("debug") || debug_from_env(),
                ..ArchiveConfig::default()
            };
            if let Some(command) = args.get_one::<String>("registry-command") {
                config.registry_command = command.clone();
            }
            if let Some(command) = args.get_one::<String>("generator-command") {
                config.generator_command = command.clone();
            }

            let pipeline = ArchivePipeline::new(config, repo_root);
            match pipeline.run().await {
                Ok(summary) => {
                    println!();
                    println!("Done.");
                    println!("  Branched: {}", summary.branched.len());
                    println!("  Not branched: {}", summary.unbranched());
                    println!("  Already installed: {}", summary.already_branched.len());
                }
                Err(err) => {
                    tracing::error!("Run aborted: {}", err);
                    std::process::exit(1);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

//! gitsync — mirror every Bitbucket repository your account can reach.
//!
//! # Usage
//!
//! ```text
//! gitsync [--dry-run] [--strategy update|replace]
//! ```
//!
//! Configuration comes from the environment: `BITBUCKET_USER`,
//! `BITBUCKET_KEY`, `BITBUCKET_SECRET`, `OUTPUT_DIR`, and optionally
//! `LOG_FILE` and `SYNC_STRATEGY`. Flags override their environment
//! counterparts.

mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use gitsync_bitbucket::BitbucketClient;
use gitsync_core::{RunConfig, SyncMode};
use gitsync_engine::{run_blocking, RunReport};
use gitsync_git::GitProcess;

#[derive(Parser, Debug)]
#[command(
    name = "gitsync",
    version,
    about = "Mirror every Bitbucket repository your account can reach",
    long_about = None,
)]
struct Cli {
    /// Enumerate and log what would be synced, without touching git or the
    /// filesystem.
    #[arg(long, visible_alias = "dryrun")]
    dry_run: bool,

    /// Sync strategy for this run; overrides SYNC_STRATEGY.
    #[arg(long, value_name = "update|replace")]
    strategy: Option<SyncMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RunConfig::from_env().context("incomplete configuration")?;
    config.dry_run = cli.dry_run;
    if let Some(mode) = cli.strategy {
        config.mode = mode;
    }

    logging::init(config.log_file.as_deref())?;

    info!("starting gitsync");
    if config.dry_run {
        info!("dry run");
    }
    info!(
        strategy = %config.mode,
        output_dir = %config.output_dir.display(),
        "configuration loaded"
    );

    let client = BitbucketClient::connect(&config).context("bitbucket authentication failed")?;
    let auth = Arc::new(client.url_auth());
    let config = Arc::new(config);

    let report = run_blocking(
        Arc::clone(&config),
        Arc::new(client),
        Arc::new(GitProcess),
        auth,
    )
    .context("sync run failed")?;

    print_report(&report, config.dry_run);
    info!("completed gitsync");
    Ok(())
}

/// Human summary on stdout. Per-repository failures never change the exit
/// code; a run that completed is a successful run.
fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if report.failures.is_empty() {
        println!(
            "{prefix}{} {} repositories synced in {:.1?}",
            "✓".green(),
            report.attempted,
            report.duration
        );
        return;
    }

    println!(
        "{prefix}{} {} of {} repositories synced, {} failed:",
        "✗".red(),
        report.succeeded(),
        report.attempted,
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  >> {}", failure.repository.full_name);
    }
}

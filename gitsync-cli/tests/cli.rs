use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;

/// A command with every gitsync variable scrubbed, so the ambient
/// environment of the test runner can never leak in.
fn gitsync_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitsync"));
    for var in [
        "BITBUCKET_USER",
        "BITBUCKET_KEY",
        "BITBUCKET_SECRET",
        "OUTPUT_DIR",
        "LOG_FILE",
        "SYNC_STRATEGY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn missing_environment_fails_fast() {
    gitsync_cmd()
        .assert()
        .failure()
        .stderr(contains("BITBUCKET_USER"));
}

#[test]
fn help_lists_the_flags() {
    gitsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--dry-run"))
        .stdout(contains("--strategy"));
}

#[test]
fn dryrun_alias_is_accepted() {
    // The flag parses; the run then stops on the missing configuration, not
    // on an argument error.
    gitsync_cmd()
        .arg("--dryrun")
        .assert()
        .failure()
        .stderr(contains("BITBUCKET_USER"));
}

#[test]
fn bare_dryrun_token_is_a_usage_error() {
    // Only the flag forms enable dry-run.
    gitsync_cmd()
        .arg("dryrun")
        .assert()
        .failure()
        .stderr(contains("unexpected argument"))
        .stderr(contains("dryrun"));
}

#[test]
fn unknown_flag_is_rejected() {
    gitsync_cmd()
        .arg("--mirror")
        .assert()
        .failure()
        .stderr(contains("unexpected argument"));
}

#[test]
fn invalid_strategy_value_is_rejected() {
    gitsync_cmd()
        .args(["--strategy", "mirror"])
        .assert()
        .failure()
        .stderr(contains("mirror"));
}

#[test]
fn invalid_strategy_environment_is_reported() {
    gitsync_cmd()
        .env("SYNC_STRATEGY", "mirror")
        .assert()
        .failure()
        .stderr(contains("SYNC_STRATEGY"));
}

//! CLI argument parsing and startup validation tests - no network I/O.
//!
//! These tests verify that bad flags and bad config files are rejected before
//! any cassette or live adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("quotecard")
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--history"));
}

#[test]
fn unknown_flag_is_rejected() {
    cmd().arg("--model").assert().failure().stderr(predicate::str::contains("--model"));
}

#[test]
fn malformed_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[post\nauthor = ").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"));

    // nothing was composed or recorded
    assert!(!dir.path().join("post.jpg").exists());
    assert!(!dir.path().join("history.txt").exists());
}

#[test]
fn missing_cassette_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .env("QUOTECARD_CONFIG", dir.path().join("absent.toml"))
        .env("QUOTECARD_REPLAY", dir.path().join("absent.cassette.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load cassette"));
}

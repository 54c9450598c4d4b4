//! Integration tests for the `huecli` binary.
//!
//! These tests exercise the CLI binary via `assert_cmd`. Every invocation
//! points `--config` at a temp dir, and none of them need a reachable bridge.

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use huecli_lib::config::Config;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("huecli")
}

fn cli_with(config: &Path) -> assert_cmd::Command {
    let mut cmd = cli();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("huecli"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── Exit codes ──

#[test]
fn missing_subcommand_exits_2() {
    cli().assert().code(2);
}

#[test]
fn unknown_subcommand_exits_2() {
    cli().arg("dance").assert().code(2);
}

#[test]
fn add_without_id_exits_2_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .arg("add")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("light id missing"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn remove_zero_id_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["remove", "--id=0"])
        .assert()
        .code(2);
}

#[test]
fn non_integer_id_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["add", "--id=abc"])
        .assert()
        .code(5);
}

#[test]
fn out_of_range_brightness_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["change", "--color=red", "--brightness=150"])
        .assert()
        .code(5);
}

#[test]
fn unknown_flag_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["switch", "--fast"])
        .assert()
        .code(5);
}

#[test]
fn change_before_init_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["change", "--color=blue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("init"));
}

#[test]
fn switch_before_init_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .arg("switch")
        .assert()
        .code(1);
}

#[test]
fn corrupt_config_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "lights = \"oops\"").unwrap();
    cli_with(&path).arg("info").assert().code(1);
}

// ── Managed lights ──

#[test]
fn add_remove_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    cli_with(&path).args(["add", "--id=3"]).assert().success();
    cli_with(&path).args(["add", "--id", "7"]).assert().success();
    cli_with(&path).args(["add", "--id=3"]).assert().success();
    cli_with(&path).args(["remove", "--id=7"]).assert().success();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.lights, vec![3]);
}

#[test]
fn first_run_creates_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hue").join("config").join("config.toml");
    cli_with(&path).arg("info").assert().success();
    assert!(path.exists());
}

// ── Output ──

#[test]
fn info_json_produces_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli_with(&dir.path().join("config.toml"))
        .args(["--json", "info"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("info --json should produce valid JSON");
    assert!(json["lights"].as_array().unwrap().is_empty());
    assert_eq!(json["application_id"], "");
    assert!(json["config_file"].is_string());
}

#[test]
fn info_shows_unregistered() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not registered)"));
}

#[test]
fn verbose_flag_accepted() {
    let dir = tempfile::tempdir().unwrap();
    cli_with(&dir.path().join("config.toml"))
        .args(["-v", "info"])
        .assert()
        .success();
}

#[test]
fn change_help_lists_flags() {
    cli()
        .args(["change", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--color"))
        .stdout(predicate::str::contains("--brightness"))
        .stdout(predicate::str::contains("--id"));
}

#[test]
fn init_help_succeeds() {
    cli()
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("link button"));
}

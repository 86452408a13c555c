//! CLI smoke tests against the built binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn leaderboard() -> Command {
    let mut cmd = Command::cargo_bin("leaderboard").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("LEADERBOARD_DATABASE");
    cmd
}

#[test]
fn calendar_reports_override_in_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = leaderboard()
        .args(["calendar", "2026-09-11", "--override", "10", "--json", "-c"])
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 10);
    assert_eq!(value["remaining"], 7);
    assert_eq!(value["policy"], "sunday_only");
}

#[test]
fn calendar_counts_weekdays_without_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = leaderboard()
        .args([
            "calendar",
            "2026-10-19",
            "--policy",
            "saturday-and-sunday",
            "--json",
            "-c",
        ])
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    // October 2026 has 22 weekdays; 19th to 30th leaves 10.
    assert_eq!(value["total"], 22);
    assert_eq!(value["remaining"], 10);
}

#[test]
fn config_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    leaderboard()
        .args(["config", "init", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    leaderboard()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));

    leaderboard()
        .args(["config", "init", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[speech]\nvolume = 3.0\n").unwrap();

    leaderboard()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("speech.volume"));
}

#[test]
fn targets_on_empty_database_is_an_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    leaderboard()
        .env("LEADERBOARD_DATABASE", dir.path().join("board.db"))
        .args(["targets", "--date", "2026-10-19", "--json", "-c"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

//! Integration tests for the greg binary's argument validation.
//!
//! These never reach the network: every case fails before a fetch starts.

use std::process::Command;

fn greg(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_greg"))
        .args(args)
        .env_remove("GITHUB_TOKEN")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn missing_location_fails() {
    let output = greg(&["needle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("must specify either url or both org and repo"));
}

#[test]
fn unsupported_host_fails() {
    let output = greg(&["--url", "https://gitlab.com/agrski/greg", "needle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unsupported git hosting provider: gitlab.com"));
}

#[test]
fn missing_pattern_fails() {
    let output = greg(&["--org", "agrski", "--repo", "greg"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Search term must be specified"));
}

#[test]
fn missing_token_fails() {
    let output = greg(&["--org", "agrski", "--repo", "greg", "needle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("access token"));
    assert!(output.stdout.is_empty());
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("greg.toml");
    std::fs::write(&path, "[fetch\n").unwrap();

    let output = greg(&[
        "--config",
        path.to_str().unwrap(),
        "--org",
        "agrski",
        "--repo",
        "greg",
        "needle",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config parse error"));
}

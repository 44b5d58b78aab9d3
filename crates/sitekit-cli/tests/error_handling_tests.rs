//! Tests for error handling and exit codes.

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn sitekit(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("sitekit");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_unknown_config_key_exits_four() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    sitekit(&home)
        .arg("-C")
        .arg(project.path())
        .args(["config", "get", "site.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key: 'site.nope'"))
        .stderr(predicate::str::contains("sitekit config list"));
}

#[test]
fn test_missing_explicit_config_exits_four() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    sitekit(&home)
        .arg("-C")
        .arg(project.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_malformed_project_config_exits_four() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(project.path().join("sitekit.toml"), "[site\noutput_dir = ").unwrap();
    sitekit(&home)
        .arg("-C")
        .arg(project.path())
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_invalid_glob_exits_two() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(
        project.path().join("sitekit.toml"),
        "[site]\nsources = [\"_posts/{a,b\"]\n",
    )
    .unwrap();
    sitekit(&home)
        .arg("-C")
        .arg(project.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid glob"));
}

#[test]
fn test_missing_project_dir_exits_three() {
    let home = TempDir::new().unwrap();
    sitekit(&home)
        .args(["-C", "/definitely/not/a/site", "less-build"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project directory not found"));
}

#[test]
fn test_zero_debounce_is_rejected() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    sitekit(&home)
        .arg("-C")
        .arg(project.path())
        .args(["watch", "--debounce-ms", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("debounce"));
}

#[test]
fn test_unknown_subcommand_exits_two() {
    let home = TempDir::new().unwrap();
    sitekit(&home)
        .arg("deploy")
        .assert()
        .code(2);
}

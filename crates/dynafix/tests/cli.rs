//! Binary-level tests: argument parsing, exit codes and printed output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const USERS: &str = r#"
description = "Staff accounts"

[[records]]
collection = "users"
key = "username"
data = { username = "alice" }
"#;

const GROUPS: &str = r#"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "groups"
key = "name"
data = { name = "staff" }
"#;

fn workdir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "accounts", "0001_users", USERS);
    write_manifest(dir.path(), "accounts", "0002_groups", GROUPS);
    dir
}

fn write_manifest(root: &Path, namespace: &str, name: &str, content: &str) {
    let fixtures = root.join(namespace).join("fixtures");
    fs::create_dir_all(&fixtures).unwrap();
    fs::write(fixtures.join(format!("{name}.toml")), content).unwrap();
}

/// Command isolated from the caller's dynafix environment
fn dynafix(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dynafix"));
    cmd.current_dir(dir.path())
        .env_remove("DYNAFIX_WORKDIR")
        .env_remove("DYNAFIX_STORE")
        .env_remove("DYNAFIX_STRICT")
        .env_remove("DYNAFIX_LOG_LEVEL")
        .env_remove("DYNAFIX_LOG_FORMAT")
        .env_remove("DYNAFIX_LOG_OUTPUT")
        .env_remove("DYNAFIX_COLOR")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn version_prints_package_version() {
    let dir = workdir();

    dynafix(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "dynafix {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_command_prints_usage_hint() {
    let dir = workdir();

    dynafix(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("dynafix --help"));
}

#[test]
fn list_prints_fixtures_in_load_order() {
    let dir = workdir();

    let output = dynafix(&dir).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let users = stdout.find(" * accounts.0001_users").unwrap();
    let groups = stdout.find(" * accounts.0002_groups").unwrap();
    assert!(users < groups);
    assert!(stdout.contains("Staff accounts"));
    assert!(stdout.contains("Searched 1 namespaces."));
    assert!(stdout.contains("Found 2 dynamic fixtures."));
}

#[test]
fn list_json_is_machine_readable() {
    let dir = workdir();

    let output = dynafix(&dir)
        .args(["list", "--format", "json"])
        .assert()
        .success();
    let listed: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(listed[0]["key"], "accounts.0001_users");
    assert_eq!(listed[1]["dependencies"][0], "accounts.0001_users");
}

#[test]
fn load_reports_each_fixture_and_commits() {
    let dir = workdir();

    dynafix(&dir)
        .arg("load")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Loading fixture accounts.0001_users... SUCCESS (",
        ))
        .stdout(predicate::str::contains(
            "Loading fixture accounts.0002_groups... SUCCESS (",
        ))
        .stdout(predicate::str::contains("Loaded 2 fixtures"));

    let store = fs::read_to_string(dir.path().join("dynafix-store.json")).unwrap();
    assert!(store.contains("alice"));
}

#[test]
fn dry_run_reports_rollback() {
    let dir = workdir();

    dynafix(&dir)
        .args(["load", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dry run: 2 fixtures loaded and rolled back",
        ));

    assert!(!dir.path().join("dynafix-store.json").exists());
}

#[test]
fn unknown_prefix_fails() {
    let dir = workdir();

    dynafix(&dir)
        .args(["load", "accounts", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Fixture with prefix '9' not found in namespace 'accounts'",
        ));
}

#[test]
fn list_explains_dependency_on_skipped_manifest() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "shop", "0001_base", "bogus = 1\n");
    write_manifest(
        dir.path(),
        "shop",
        "0002_items",
        r#"dependencies = ["shop.0001_base"]"#,
    );

    dynafix(&dir)
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Skipped Fixture shop.0001_base is invalid"))
        .stdout(predicate::str::contains("bogus"))
        .stderr(predicate::str::contains(
            "Fixture shop.0002_items depends on shop.0001_base, which is not in the catalog",
        ));
}

#[test]
fn missing_workdir_fails() {
    let dir = workdir();

    dynafix(&dir)
        .args(["--workdir", "does-not-exist", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working directory"));
}

#[test]
fn workdir_from_environment() {
    let dir = workdir();
    let elsewhere = TempDir::new().unwrap();

    let mut cmd = dynafix(&elsewhere);
    cmd.env("DYNAFIX_WORKDIR", dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 dynamic fixtures."));
}

#[test]
fn config_file_sets_store_location() {
    let dir = workdir();
    fs::write(dir.path().join("dynafix.toml"), "store = \"data/seed.json\"\n").unwrap();

    dynafix(&dir).arg("load").assert().success();

    assert!(dir.path().join("data/seed.json").is_file());
}

#[test]
fn invalid_log_level_is_rejected_by_parser() {
    let dir = workdir();

    dynafix(&dir)
        .args(["--log-level", "7", "version"])
        .assert()
        .failure()
        .code(2);
}

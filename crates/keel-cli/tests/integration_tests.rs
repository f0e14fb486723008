//! End-to-end CLI tests via the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn keel() -> Command {
    Command::cargo_bin("keel").expect("binary builds")
}

#[test]
fn help_lists_subcommands() {
    keel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn no_arguments_shows_help_and_fails() {
    keel().assert().failure();
}

#[test]
fn plan_lists_expected_files() {
    keel()
        .args(["plan", "order-hub", "--container", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cargo.toml"))
        .stdout(predicate::str::contains("crates/order-hub/Cargo.toml"))
        .stdout(predicate::str::contains("Dockerfile"));
}

#[test]
fn plan_without_container_excludes_dockerfile() {
    keel()
        .args(["plan", "order-hub", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile").not());
}

#[test]
fn plan_json_is_machine_readable() {
    let output = keel()
        .args(["plan", "order-hub", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert!(rows.iter().any(|r| r["path"] == "README.md"));
    assert!(rows.iter().all(|r| r["id"].is_string()));
}

#[test]
fn new_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    keel()
        .args([
            "new",
            "order-hub",
            "--database",
            "sqlite",
            "--dry-run",
            "--output",
        ])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dir.path().join("order-hub").exists());
}

#[test]
fn new_scaffolds_a_project_tree() {
    let dir = tempfile::tempdir().unwrap();

    keel()
        .args([
            "new",
            "order-hub",
            "--database",
            "postgres",
            "--arch",
            "modular",
            "--container",
            "--sample-module",
            "--yes",
            "--output",
        ])
        .arg(dir.path())
        .assert()
        .success();

    let root = dir.path().join("order-hub");
    assert!(root.join("Cargo.toml").exists());
    assert!(root.join("crates/order-hub-api/Cargo.toml").exists());
    assert!(root.join("crates/order-hub-api/src/main.rs").exists());
    assert!(root.join("crates/order-hub-sample/src/lib.rs").exists());
    assert!(root.join("Dockerfile").exists());
    assert!(root.join("config/default.toml").exists());

    let solution = std::fs::read_to_string(root.join("Cargo.toml")).unwrap();
    assert!(solution.contains("crates/order-hub-api"));
    assert!(!solution.contains("{{"));
}

#[test]
fn new_refuses_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("order-hub")).unwrap();

    keel()
        .args(["new", "order-hub", "--yes", "--output"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn upgrade_reports_diff_with_breaking_marker() {
    let dir = tempfile::tempdir().unwrap();
    let current = dir.path().join("current.toml");
    let latest = dir.path().join("latest.toml");

    std::fs::write(
        &current,
        "[dependencies]\nserde = \"1.0\"\naxum = \"0.7\"\nold-only = \"2.0\"\n",
    )
    .unwrap();
    std::fs::write(
        &latest,
        "[dependencies]\nserde = \"2.0\"\naxum = \"0.8\"\nnew-only = \"1.0\"\n",
    )
    .unwrap();

    keel()
        .args(["--no-color", "upgrade", "--current"])
        .arg(&current)
        .arg("--latest")
        .arg(&latest)
        .assert()
        .success()
        .stdout(predicate::str::contains("+ new-only"))
        .stdout(predicate::str::contains("- old-only"))
        .stdout(predicate::str::contains("serde"))
        .stdout(predicate::str::contains("BREAKING"))
        .stdout(predicate::str::contains("1 breaking"));
}

#[test]
fn upgrade_json_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let current = dir.path().join("current.toml");
    let latest = dir.path().join("latest.toml");
    std::fs::write(&current, "[dependencies]\na = \"1.0\"\n").unwrap();
    std::fs::write(&latest, "[dependencies]\na = \"1.1\"\n").unwrap();

    let output = keel()
        .args(["upgrade", "--json", "--tag", "v0.4.0", "--current"])
        .arg(&current)
        .arg("--latest")
        .arg(&latest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["release"]["tag"], "v0.4.0");
    assert_eq!(report["diff"]["updated"][0]["name"], "a");
    assert_eq!(report["diff"]["updated"][0]["breaking"], false);
}

#[test]
fn upgrade_same_path_is_rejected() {
    keel()
        .args([
            "upgrade",
            "--current",
            "Cargo.toml",
            "--latest",
            "Cargo.toml",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("same manifest"));
}

#[test]
fn upgrade_missing_manifest_exits_3() {
    keel()
        .args([
            "upgrade",
            "--current",
            "/definitely/missing.toml",
            "--latest",
            "/also/missing.toml",
        ])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn completions_emit_script() {
    keel()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keel"));
}

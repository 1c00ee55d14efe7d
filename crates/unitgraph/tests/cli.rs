//! Binary-level tests: argument handling, exit codes and stream separation

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[project]]
key = "app"

[[project.unit]]
id = "org.example.app"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.app" }]
requires = [{ namespace = "osgi.bundle", name = "org.example.lib" }]

[[project]]
key = "lib"

[[project.unit]]
id = "org.example.lib"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.lib" }]
requires = [{ namespace = "osgi.bundle", name = "org.example.app" }]
"#;

fn workdir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("unitgraph.toml"), MANIFEST).unwrap();
    dir
}

fn unitgraph(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_unitgraph"));
    cmd.current_dir(dir.path())
        .env_remove("UNITGRAPH_MANIFEST")
        .env_remove("UNITGRAPH_DUMP")
        .env_remove("RUST_LOG")
        .env("UNITGRAPH_COLOR", "never");
    cmd
}

#[test]
fn test_version_subcommand() {
    let dir = TempDir::new().unwrap();
    unitgraph(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("unitgraph "));
}

#[test]
fn test_projects_from_discovered_manifest() {
    let dir = workdir();
    unitgraph(&dir)
        .arg("projects")
        .assert()
        .success()
        .stdout("app -> lib\nlib -> app\n");
}

#[test]
fn test_cycles_are_reported_on_stdout() {
    let dir = workdir();
    unitgraph(&dir)
        .arg("cycles")
        .assert()
        .success()
        .stdout("cycle 1: app, lib\n");
}

#[test]
fn test_manifest_from_environment() {
    let dir = workdir();
    let empty = TempDir::new().unwrap();
    unitgraph(&empty)
        .env("UNITGRAPH_MANIFEST", dir.path().join("unitgraph.toml"))
        .args(["deps", "app"])
        .assert()
        .success()
        .stdout("org.example.lib 1.0.0 (bundle) from lib\n");
}

#[test]
fn test_missing_manifest_fails() {
    let dir = TempDir::new().unwrap();
    unitgraph(&dir)
        .arg("projects")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No build manifest found"));
}

#[test]
fn test_unknown_exclude_kind_is_a_usage_error() {
    let dir = workdir();
    unitgraph(&dir)
        .args(["deps", "app", "--exclude", "plugin"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_zero_jobs_rejected() {
    let dir = workdir();
    unitgraph(&dir)
        .args(["--jobs", "0", "projects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--jobs must be at least 1"));
}

#[test]
fn test_dump_option_writes_file() {
    let dir = workdir();
    unitgraph(&dir)
        .args(["--dump", "out.dot", "projects"])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("out.dot")).unwrap();
    assert!(dot.contains("p0 -> p1 [color=red"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let dir = workdir();
    unitgraph(&dir)
        .args(["--log-level", "3", "dump"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph ProjectDependencies {"));
}

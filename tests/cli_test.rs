//! Integration tests for the recce binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("recce.yml"), config).unwrap();
    temp
}

// Port 1 refuses connections immediately, so database checks fail fast.
const UNREACHABLE_CONFIG: &str = r#"
title: Test install
database:
  host: "127.0.0.1:1"
  database: app
  username: installer
  password: secret
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pre-flight"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_without_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn cli_init_creates_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created recce.yml"));
    assert!(temp.path().join("recce.yml").exists());
    Ok(())
}

#[test]
fn cli_init_refuses_to_overwrite_without_force() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("title: keep me\n");
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    let kept = fs::read_to_string(temp.path().join("recce.yml"))?;
    assert_eq!(kept, "title: keep me\n");
    Ok(())
}

#[test]
fn cli_init_force_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("title: old\n");
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.args(["init", "--force"]);
    cmd.assert().success();

    let written = fs::read_to_string(temp.path().join("recce.yml"))?;
    assert!(written.contains("writable_paths:"));
    Ok(())
}

#[test]
fn cli_system_passes_on_a_healthy_host() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.env("SCRIPT_NAME", "/install.php");
    cmd.env("HTTP_HOST", "app.test");
    cmd.env("SCRIPT_FILENAME", "/srv/app/install.php");
    cmd.env("RECCE_MEMORY_LIMIT", "512M");
    cmd.args(["system", "--path"]).arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ready to install."));
    Ok(())
}

#[test]
fn cli_system_verbose_shows_passing_details() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.env("SCRIPT_NAME", "/install.php");
    cmd.env("HTTP_HOST", "app.test");
    cmd.env("SCRIPT_FILENAME", "/srv/app/install.php");
    cmd.env("RECCE_MEMORY_LIMIT", "512M");
    cmd.args(["--verbose", "system"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("512M"));
    Ok(())
}

#[test]
fn cli_quiet_skips_the_summary_block() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.env("SCRIPT_NAME", "/install.php");
    cmd.env("HTTP_HOST", "app.test");
    cmd.env("SCRIPT_FILENAME", "/srv/app/install.php");
    cmd.env("RECCE_MEMORY_LIMIT", "512M");
    cmd.args(["--quiet", "system"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Checks:").not());
    Ok(())
}

#[test]
fn cli_database_unreachable_server_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(UNREACHABLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.arg("database");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Installation blocked"));
    Ok(())
}

#[test]
fn cli_database_json_reports_every_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(UNREACHABLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.args(["database", "--json"]);

    let assert = cmd.assert().failure().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let report: serde_json::Value = serde_json::from_str(&stdout)?;

    assert_eq!(report["title"], "Test install");
    assert_eq!(report["results"].as_array().unwrap().len(), 8);
    assert_eq!(report["blocking"], true);
    assert!(report["counts"]["errors"].as_u64().unwrap() >= 1);
    Ok(())
}

#[test]
fn cli_check_json_runs_with_flags_alone() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.args([
        "check",
        "--json",
        "--host",
        "127.0.0.1:1",
        "--database",
        "app",
        "--username",
        "installer",
        "--password",
        "secret",
    ]);

    let assert = cmd.assert().failure().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let report: serde_json::Value = serde_json::from_str(&stdout)?;

    assert_eq!(report["results"].as_array().unwrap().len(), 13);
    assert_eq!(report["blocking"], true);
    Ok(())
}

#[test]
fn cli_database_without_section_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("title: App\n");
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.arg("database");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No database configured"));
    Ok(())
}

#[test]
fn cli_config_override_is_honored() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("staging.yml"), UNREACHABLE_CONFIG)?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.args(["--config", "staging.yml", "database"]);
    // Exit 1 (checks ran and failed), not 2 (config missing).
    cmd.assert().failure().code(1);
    Ok(())
}

#[test]
fn cli_completions_generate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("recce"));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("recce"));
    cmd.current_dir(temp.path());
    cmd.env("SCRIPT_NAME", "/install.php");
    cmd.env("HTTP_HOST", "app.test");
    cmd.env("SCRIPT_FILENAME", "/srv/app/install.php");
    cmd.env("RECCE_MEMORY_LIMIT", "512M");
    cmd.args(["--debug", "system"]);
    cmd.assert().success();
    Ok(())
}

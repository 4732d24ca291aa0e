//! Smoke tests for the formpilot CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the formpilot binary, isolated from the caller's environment
fn formpilot() -> Command {
    let mut cmd = Command::cargo_bin("formpilot").expect("formpilot binary should exist");
    cmd.env_remove("RUST_LOG")
        .env_remove("FORMPILOT_CONFIG")
        .env_remove("FORMPILOT_BASE_URL")
        .env_remove("FORMPILOT_REGISTRY");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    formpilot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_help_lists_subcommands() {
    formpilot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    formpilot().assert().failure();
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_builtin_registry() {
    formpilot()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("locator keys"));
}

#[test]
fn test_validate_quiet_prints_nothing() {
    formpilot().args(["validate", "-q"]).assert().success().stdout("");
}

#[test]
fn test_validate_rejects_bad_overlay() {
    let dir = TempDir::new().unwrap();
    let overlay = write(
        &dir,
        "locators.yaml",
        "locators:\n  host.mac:\n    strategy: xpath\n    selector: \"//a[@x='{}' and @y='{}']\"\n",
    );

    formpilot()
        .args(["validate", "--registry"])
        .arg(&overlay)
        .assert()
        .failure()
        .stderr(predicate::str::contains("substitution slots"));
}

// ============================================================================
// plan
// ============================================================================

#[test]
fn test_plan_network_attributes() {
    let dir = TempDir::new().unwrap();
    let attrs = write(
        &dir,
        "host.yaml",
        "network:\n  domain: example.com\n  mac: \"00:11:22:33:44:55\"\n",
    );

    formpilot()
        .args(["plan", "--attributes"])
        .arg(&attrs)
        .assert()
        .success()
        .stdout(predicate::str::contains("host.reset_puppetenv"))
        .stdout(predicate::str::contains("select host.domain = example.com"))
        .stdout(predicate::str::contains("activate operating system tab").not());
}

#[test]
fn test_plan_json_masks_root_password() {
    let dir = TempDir::new().unwrap();
    let attrs = write(&dir, "host.yaml", "os:\n  root_password: s3cret-pass\n");

    let output = formpilot()
        .args(["plan", "--update", "--format", "json", "--attributes"])
        .arg(&attrs)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("s3cret-pass"));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["steps"].as_array().unwrap().len(), 3);
}

#[test]
fn test_plan_vm_attributes_need_resource() {
    let dir = TempDir::new().unwrap();
    let attrs = write(&dir, "host.yaml", "vm:\n  cpus: \"2\"\n");

    formpilot()
        .args(["plan", "--attributes"])
        .arg(&attrs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("compute resource"));

    formpilot()
        .args(["plan", "--resource", "libvirt", "--attributes"])
        .arg(&attrs)
        .assert()
        .success()
        .stdout(predicate::str::contains("select host.vm_cpus = 2"))
        .stdout(predicate::str::contains("select host.vm_memory = 768 MB"));
}

#[test]
fn test_plan_verbose_lists_puppet_class_control() {
    let dir = TempDir::new().unwrap();
    let attrs = write(&dir, "host.yaml", "puppet:\n  module: ntp\n");

    formpilot()
        .args(["plan", "-v", "--update", "--attributes"])
        .arg(&attrs)
        .assert()
        .success()
        .stderr(predicate::str::contains("host.select_puppetmodule, host.select_puppetclass"));
}

#[test]
fn test_plan_blank_resource_is_rejected() {
    let dir = TempDir::new().unwrap();
    let attrs = write(&dir, "host.yaml", "network:\n  domain: example.com\n");

    formpilot()
        .args(["plan", "--resource", "", "--attributes"])
        .arg(&attrs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_plan_missing_file() {
    formpilot()
        .args(["plan", "--attributes", "/nonexistent/host.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_defaults() {
    formpilot()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_resource: Bare Metal"))
        .stdout(predicate::str::contains("timeout_ms: 30000"));
}

#[test]
fn test_config_file_then_environment() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "formpilot.yaml",
        "base_url: https://file.example.com\ntimeout_ms: 1234\n",
    );

    formpilot()
        .args(["config", "--config"])
        .arg(&config)
        .env("FORMPILOT_BASE_URL", "https://env.example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: https://env.example.com"))
        .stdout(predicate::str::contains("timeout_ms: 1234"));
}

#[test]
fn test_config_rejects_bad_environment_value() {
    formpilot()
        .arg("config")
        .env("FORMPILOT_TIMEOUT_MS", "soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FORMPILOT_TIMEOUT_MS"));
}

//! Integration tests for the unifi-toolgen binary

mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn toolgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("unifi-toolgen").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--samples-dir")
        .arg(dir.join("api-samples"))
        .arg("--output-dir")
        .arg(dir.join("generated"))
        .arg("--template-dir")
        .arg(common::templates_dir());
    cmd
}

#[test]
fn test_count_json() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    let output = toolgen(dir.path())
        .args(["count", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let counts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(counts["tools"]["total"], common::FIXTURE_TOOL_COUNT);
    assert_eq!(counts["always_on"], 3);
    assert_eq!(counts["rest_skipped"][0], "hotspotop");
}

#[test]
fn test_count_report() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    toolgen(dir.path())
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENDPOINT COUNTS"))
        .stdout(predicate::str::contains("WebSocket endpoints: 1"))
        .stdout(predicate::str::contains("CRUD, no delete"))
        .stdout(predicate::str::contains("TOTAL tools:         30"));
}

#[test]
fn test_generate_then_verify() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    toolgen(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 30 tools (3 always-on)"))
        .stdout(predicate::str::contains("Skipped REST endpoints: hotspotop"));
    assert!(dir.path().join("generated/server.py").exists());

    toolgen(dir.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ MATCH"));
}

#[test]
fn test_verify_reports_artifact_mismatch() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());
    let server = dir.path().join("stale_server.py");
    fs::write(&server, "async def unifi_status():\n    ...\n").unwrap();

    toolgen(dir.path())
        .arg("verify")
        .arg("--server")
        .arg(&server)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ MISMATCH (diff: -29)"))
        .stderr(predicate::str::contains("differs by -29"));
}

#[test]
fn test_verify_without_artifact_checks_counts_only() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    toolgen(dir.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("VERIFICATION").not());
}

#[test]
fn test_modules_device_read_only() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    toolgen(dir.path())
        .args(["modules", "--select", "device", "--read-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unifi_list_devices"))
        .stdout(predicate::str::contains("unifi_report_issue"))
        .stdout(predicate::str::contains("unifi_restart_device").not())
        .stdout(predicate::str::contains("unifi_list_networks").not());
}

#[test]
fn test_missing_inventory_fails() {
    let dir = TempDir::new().unwrap();

    toolgen(dir.path())
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to count"));
}

#[test]
fn test_invalid_prefix_rejected() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());

    toolgen(dir.path())
        .args(["--tool-prefix", "bad-prefix", "count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_config_file_is_read() {
    let dir = TempDir::new().unwrap();
    common::write_fixture(dir.path());
    fs::write(dir.path().join("unifi-toolgen.toml"), "tool_prefix = \"udm\"\n").unwrap();

    toolgen(dir.path())
        .args(["modules", "--select", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("udm_report_issue"));
}

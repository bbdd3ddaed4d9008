//! CLI integration tests driving the built binary.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn costmap() -> Command {
    Command::cargo_bin("costmap").expect("binary builds")
}

#[test]
fn analyze_sample_json_has_report_shape() {
    let output = costmap()
        .args(["analyze", "--sample", "--format", "json"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(json["summary"]["total_nodes"], 200_000);
    assert_eq!(json["summary"]["health_score"], "warning");
    assert_eq!(json["scenarios"].as_object().unwrap().len(), 4);
    assert!(json["scenarios"]["ansible"]["npv_3year"].is_number());
    assert!(json["recommendations"].as_array().unwrap().len() >= 1);
}

#[test]
fn analyze_without_input_defaults_to_sample() {
    let output = costmap()
        .args(["analyze", "--format", "json"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sample estate"));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total_nodes"], 200_000);
}

#[test]
fn analyze_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("report.json");

    costmap()
        .args([
            "analyze",
            "--sample",
            "--format",
            "json",
            "--output",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&output_path).expect("report file exists");
    let json: Value = serde_json::from_str(&contents).unwrap();
    assert!(json["cost_breakdown"]["technical_debt_tax"].is_number());
}

#[test]
fn analyze_terminal_renders_sections() {
    let output = costmap()
        .args(["analyze", "--sample", "--plain"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Estate TCO Analysis Report"));
    assert!(stdout.contains("ansible"));
    assert!(stdout.contains("Recommendations"));
}

#[test]
fn analyze_loads_profile_document() {
    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("estate.yaml");
    fs::write(
        &profile_path,
        "infrastructure:\n  total_managed_nodes: 5000\ncookbooks:\n  active_cookbooks: 100\n",
    )
    .unwrap();

    let output = costmap()
        .args([
            "analyze",
            profile_path.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total_nodes"], 5000);
    assert_eq!(json["health_metrics"]["cookbook_ratio"], 20.0);
}

#[test]
fn sample_flag_conflicts_with_profile_path() {
    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("estate.yaml");
    fs::write(&profile_path, "{}").unwrap();

    costmap()
        .args(["analyze", "--sample", profile_path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn analyze_rejects_negative_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("estate.yaml");
    fs::write(
        &profile_path,
        "licensing:\n  annual_license_cost: -100\n",
    )
    .unwrap();

    let output = costmap()
        .args(["analyze", profile_path.to_str().unwrap()])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("annual_license_cost"));
}

#[test]
fn validate_reports_inconsistencies() {
    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("estate.yaml");
    fs::write(
        &profile_path,
        "cookbooks:\n  total_cookbooks: 10\n  active_cookbooks: 50\n",
    )
    .unwrap();

    let output = costmap()
        .args(["validate", profile_path.to_str().unwrap()])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("inconsistency"));
    assert!(stdout.contains("active_cookbooks (50) exceeds total_cookbooks (10)"));
}

#[test]
fn init_writes_config_and_respects_existing() {
    let temp_dir = TempDir::new().unwrap();

    costmap()
        .current_dir(temp_dir.path())
        .args(["init"])
        .assert()
        .success();
    let config = fs::read_to_string(temp_dir.path().join(".costmap.toml")).unwrap();
    assert!(config.contains("[[alternatives]]"));
    assert!(config.contains("kubernetes"));

    // A second init without --force must refuse to clobber the file.
    costmap()
        .current_dir(temp_dir.path())
        .args(["init"])
        .assert()
        .failure();

    costmap()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn unknown_extension_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("estate.ini");
    fs::write(&profile_path, "x").unwrap();

    let output = costmap()
        .args(["analyze", profile_path.to_str().unwrap()])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported input format"));
}

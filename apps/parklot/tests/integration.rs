//! Integration tests for the parklot CLI

use std::io::Write;
use std::process::{Command, Output};

fn parklot(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_parklot"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PARKLOT_CAPACITY")
        .env_remove("PARKLOT_NAME")
        .env_remove("PARKLOT_LOG_LEVEL")
        .env_remove("PARKLOT_LOG_JSON")
        .output()
        .expect("Failed to execute parklot")
}

#[test]
fn test_cli_help() {
    let output = parklot(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Drive a capacity-bounded parking lot"));
    assert!(stdout.contains("--capacity"));
}

#[test]
fn test_fill_and_release() {
    let output = parklot(&["--capacity", "2", "park:A", "park:B", "unpark:B"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parked   A"));
    assert!(stdout.contains("is full"));
    assert!(stdout.contains("SPACE AVAILABLE"));
    assert!(stdout.contains("notices: 1 full, 1 space available"));
}

#[test]
fn test_rejection_sets_exit_status() {
    let output = parklot(&["--capacity", "1", "park:A", "park:B"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lot.capacity_exceeded"));
}

#[test]
fn test_json_output_is_one_object_per_line() {
    let output = parklot(&["--json", "--capacity", "1", "park:A", "unpark:A", "unpark:A"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let types: Vec<&str> = lines
        .iter()
        .filter_map(|value| value["event"]["type"].as_str())
        .collect();
    assert_eq!(
        types,
        vec![
            "observer_added",
            "vehicle_parked",
            "lot_full",
            "vehicle_unparked",
            "space_available",
            "operation_rejected"
        ]
    );

    let summary = lines.last().unwrap();
    assert_eq!(summary["occupancy"]["occupied"], 0);
    assert_eq!(summary["notices"]["full"], 1);
}

#[test]
fn test_config_file_sets_capacity_and_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[lot]\nname = \"north\"\ncapacity = 1").unwrap();
    let path = file.path().to_str().unwrap();

    let output = parklot(&["--config", path, "park:A"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("north is full"));
}

#[test]
fn test_zero_capacity_is_an_error() {
    let output = parklot(&["--capacity", "0", "park:A"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--capacity must be at least 1"));
}

#[test]
fn test_unreadable_config_is_reported_before_logging_starts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[lot\ncapacity = ").unwrap();
    let path = file.path().to_str().unwrap();

    let output = parklot(&["--config", path, "park:A"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("Code: config.parse_error"));
}

#[test]
fn test_json_logs_carry_rejections() {
    let output = parklot(&["--json", "--capacity", "1", "park:A", "park:B"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let rejection = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|value| value["fields"]["message"] == "Operation rejected")
        .expect("rejection logged");
    assert_eq!(rejection["level"], "WARN");
    assert_eq!(rejection["fields"]["vehicle"], "B");
}

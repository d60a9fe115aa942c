//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::io::Write;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "taskrank-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Write a payload to a temp file and return the file handle.
fn payload_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write payload");
    file
}

#[test]
fn test_analyze_ranks_past_due_first() {
    let file = payload_file(
        r#"[
            {"id": "past", "title": "Past", "due_date": "2026-08-25", "estimated_hours": 5, "importance": 5},
            {"id": "future", "title": "Future", "due_date": "2026-09-04", "estimated_hours": 1, "importance": 5}
        ]"#,
    );

    let (stdout, stderr, code) = run_cli(&[
        "analyze",
        file.path().to_str().unwrap(),
        "--date",
        "2026-08-30",
    ]);
    assert_eq!(code, 0, "analyze failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(json["tasks"][0]["id"], "past");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
    assert!(json["cycles"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_reports_cycles_in_permissive_mode() {
    let file = payload_file(
        r#"[
            {"id": "1", "title": "T1", "dependencies": ["2"]},
            {"id": "2", "title": "T2", "dependencies": ["3"]},
            {"id": "3", "title": "T3", "dependencies": ["1"]},
            {"id": "4", "title": "T4"}
        ]"#,
    );

    let (stdout, stderr, code) = run_cli(&["analyze", file.path().to_str().unwrap()]);
    assert_eq!(code, 0, "analyze failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(json["cycles"], serde_json::json!(["1", "2", "3"]));

    let flagged = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["flags"]["circular_dependency"] == true)
        .count();
    assert_eq!(flagged, 3);
}

#[test]
fn test_analyze_strict_mode_fails_on_cycle() {
    let file = payload_file(
        r#"[
            {"id": "1", "title": "T1", "dependencies": ["2"]},
            {"id": "2", "title": "T2", "dependencies": ["1"]}
        ]"#,
    );

    let (_, stderr, code) = run_cli(&["analyze", file.path().to_str().unwrap(), "--strict"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Circular dependency"), "stderr: {stderr}");
}

#[test]
fn test_analyze_rejects_invalid_fields_with_index() {
    let file = payload_file(r#"[{"title": "A", "importance": 42}]"#);

    let (_, stderr, code) = run_cli(&["analyze", file.path().to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(
        stderr.contains("task 0: importance must be between 1 and 10"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_suggest_returns_top_n_with_why() {
    let file = payload_file(
        r#"[
            {"id": "a", "title": "A", "due_date": "2026-08-31", "estimated_hours": 0.5},
            {"id": "b", "title": "B", "due_date": "2026-10-01", "estimated_hours": 8},
            {"id": "c", "title": "C"}
        ]"#,
    );

    let (stdout, stderr, code) = run_cli(&[
        "suggest",
        file.path().to_str().unwrap(),
        "--count",
        "2",
        "--date",
        "2026-08-30",
    ]);
    assert_eq!(code, 0, "suggest failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["id"], "a");
    assert!(suggestions[0]["why"].as_str().unwrap().len() > 0);
}

#[test]
fn test_strategies_lists_presets() {
    let (stdout, stderr, code) = run_cli(&["strategies"]);
    assert_eq!(code, 0, "strategies failed: {stderr}");

    for name in ["smart_balance", "fastest_wins", "high_impact", "deadline_driven"] {
        assert!(stdout.contains(name), "missing {name} in: {stdout}");
    }
}

//! Integration tests for the taskrank CLI.
//!
//! These tests verify the end-to-end behavior of all CLI commands.

use rstest::{fixture, rstest};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

mod common;
use common::{run_taskrank_in_dir, run_taskrank_with_stdin, stdout_json, write_tasks};

const TODAY: &str = "2025-03-01";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// A small batch where "A" unblocks two others and one task has no estimate
fn sample_tasks() -> serde_json::Value {
    json!([
        {"id": "B", "title": "Write docs", "due_date": "2025-03-20", "estimated_hours": 3, "importance": 4, "dependencies": ["A"]},
        {"id": "C", "title": "Release", "due_date": "2025-03-05", "importance": 6, "dependencies": ["A"]},
        {"id": "A", "title": "Fix build", "due_date": "2025-03-02", "estimated_hours": 1, "importance": 9, "dependencies": []}
    ])
}

/// Provides a temporary directory containing `tasks.json`
#[fixture]
fn tasks_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = write_tasks(temp.path(), "tasks.json", &sample_tasks());
    (temp, path)
}

fn task_ids(tasks: &serde_json::Value) -> Vec<String> {
    tasks
        .as_array()
        .expect("tasks should be an array")
        .iter()
        .map(|t| t["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_taskrank_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for command in ["analyze", "suggest", "cycles", "init"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_taskrank_in_dir(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("0.1.0"));
}

// ============================================================================
// Analyze Tests
// ============================================================================

#[rstest]
fn test_analyze_json(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(
        temp.path(),
        &["analyze", path.to_str().unwrap(), "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    assert_eq!(body["strategy"], "smart_balance");
    assert_eq!(task_ids(&body["tasks"])[0], "A");
    assert_eq!(body["tasks"].as_array().unwrap().len(), 3);

    let first = &body["tasks"][0];
    assert!(first["score"].as_f64().unwrap() > 0.0);
    assert!(first["priority_label"].is_string());
    assert!(first["explanation"].as_str().unwrap().contains("Unblocks several"));

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0],
        "Task 'Release' missing estimated_hours, using neutral effort in scoring."
    );
}

#[rstest]
fn test_analyze_text(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(
        temp.path(),
        &["analyze", path.to_str().unwrap(), "--today", TODAY],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Strategy: smart_balance"));
    assert!(stdout.contains("Ranked 3 task(s):"));
    assert!(stdout.contains("Fix build"));
    assert!(stdout.contains("Warnings (1):"));
    assert!(stdout.find("Fix build").unwrap() < stdout.find("Write docs").unwrap());
}

#[rstest]
#[case::fastest_wins("fastest_wins")]
#[case::high_impact("high_impact")]
#[case::deadline_driven("deadline-driven")]
fn test_analyze_strategy_flag(tasks_dir: (TempDir, PathBuf), #[case] name: &str) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(
        temp.path(),
        &["analyze", path.to_str().unwrap(), "-s", name, "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    assert_eq!(body["strategy"], name.replace('-', "_"));
}

#[rstest]
fn test_analyze_reads_envelope_from_stdin(temp_dir: TempDir) {
    let payload = json!({"tasks": sample_tasks(), "strategy": "deadline_driven"}).to_string();

    let output = run_taskrank_with_stdin(
        temp_dir.path(),
        &["analyze", "--json", "--today", TODAY],
        &payload,
    );
    let body = stdout_json(&output);
    assert_eq!(body["strategy"], "deadline_driven");

    let output = run_taskrank_with_stdin(
        temp_dir.path(),
        &["analyze", "-", "-s", "high_impact", "--json", "--today", TODAY],
        &payload,
    );
    let body = stdout_json(&output);
    assert_eq!(body["strategy"], "high_impact");
}

#[rstest]
fn test_analyze_unknown_envelope_strategy_falls_back(temp_dir: TempDir) {
    let payload = json!({"tasks": sample_tasks(), "strategy": "yolo"}).to_string();

    let output = run_taskrank_with_stdin(
        temp_dir.path(),
        &["analyze", "--json", "--today", TODAY],
        &payload,
    );
    assert_eq!(stdout_json(&output)["strategy"], "smart_balance");
}

#[rstest]
fn test_analyze_reports_cycles_and_bad_dates(temp_dir: TempDir) {
    let path = write_tasks(
        temp_dir.path(),
        "tasks.json",
        &json!([
            {"id": "1", "title": "Left", "due_date": "soon", "estimated_hours": 1, "importance": 5, "dependencies": ["2"]},
            {"id": "2", "title": "Right", "estimated_hours": 1, "importance": 5, "dependencies": ["1"]}
        ]),
    );

    let output = run_taskrank_in_dir(
        temp_dir.path(),
        &["analyze", path.to_str().unwrap(), "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    let warnings: Vec<&str> = body["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect();
    assert_eq!(
        warnings,
        vec![
            "Detected circular dependencies involving task IDs: 1, 2.",
            "Task 'Left' has invalid due_date value 'soon', treated as no due date.",
        ]
    );
}

#[rstest]
fn test_analyze_rejects_invalid_tasks(temp_dir: TempDir) {
    let path = write_tasks(
        temp_dir.path(),
        "tasks.json",
        &json!([
            {"id": "1", "title": "", "importance": 5},
            {"id": "2", "title": "Too important", "importance": 11, "estimated_hours": -1}
        ]),
    );

    let output = run_taskrank_in_dir(temp_dir.path(), &["analyze", path.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("3 invalid task field(s)"), "stderr: {stderr}");
    assert!(stderr.contains("tasks[0].title"));
    assert!(stderr.contains("tasks[1].importance"));
    assert!(stderr.contains("tasks[1].estimated_hours"));
}

#[rstest]
fn test_analyze_rejects_malformed_json(temp_dir: TempDir) {
    let output = run_taskrank_with_stdin(temp_dir.path(), &["analyze"], "{\"title\": \"x\"}");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid tasks payload"));
}

#[rstest]
fn test_analyze_missing_file(temp_dir: TempDir) {
    let output = run_taskrank_in_dir(temp_dir.path(), &["analyze", "nope.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IO error"));
}

// ============================================================================
// Suggest Tests
// ============================================================================

#[rstest]
fn test_suggest_defaults_to_three(temp_dir: TempDir) {
    let tasks: Vec<_> = (1..=5)
        .map(|i| json!({"id": i.to_string(), "title": format!("Task {i}"), "estimated_hours": 1, "importance": i}))
        .collect();
    let path = write_tasks(temp_dir.path(), "tasks.json", &json!(tasks));

    let output = run_taskrank_in_dir(
        temp_dir.path(),
        &["suggest", path.to_str().unwrap(), "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    assert!(body.get("tasks").is_none());
    assert_eq!(task_ids(&body["suggested_tasks"]), vec!["5", "4", "3"]);
}

#[rstest]
fn test_suggest_limit_flag(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(
        temp.path(),
        &["suggest", path.to_str().unwrap(), "-n", "1", "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    assert_eq!(task_ids(&body["suggested_tasks"]), vec!["A"]);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[rstest]
fn test_suggest_text(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(
        temp.path(),
        &["suggest", path.to_str().unwrap(), "-n", "2", "--today", TODAY],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Top 2 suggested task(s):"));
}

#[rstest]
fn test_suggest_uses_config_file(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    std::fs::write(
        temp.path().join("taskrank.yaml"),
        "default-strategy: fastest_wins\nsuggest-limit: 2\n",
    )
    .unwrap();

    let output = run_taskrank_in_dir(
        temp.path(),
        &["suggest", path.to_str().unwrap(), "--json", "--today", TODAY],
    );
    let body = stdout_json(&output);

    assert_eq!(body["strategy"], "fastest_wins");
    assert_eq!(body["suggested_tasks"].as_array().unwrap().len(), 2);
}

#[rstest]
fn test_explicit_config_path(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("custom.yaml");
    std::fs::write(&config_path, "default-strategy: high_impact\n").unwrap();

    let output = run_taskrank_in_dir(
        temp.path(),
        &[
            "analyze",
            path.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
            "--json",
            "--today",
            TODAY,
        ],
    );

    assert_eq!(stdout_json(&output)["strategy"], "high_impact");
}

// ============================================================================
// Cycles Tests
// ============================================================================

#[rstest]
fn test_cycles_json(temp_dir: TempDir) {
    let path = write_tasks(
        temp_dir.path(),
        "tasks.json",
        &json!([
            {"id": "a", "title": "A", "dependencies": ["b"]},
            {"id": "b", "title": "B", "dependencies": ["c"]},
            {"id": "c", "title": "C", "dependencies": ["a"]},
            {"id": "d", "title": "D"}
        ]),
    );

    let output = run_taskrank_in_dir(temp_dir.path(), &["cycles", path.to_str().unwrap(), "--json"]);
    let body = stdout_json(&output);

    assert_eq!(body["circular"], json!(["a", "b", "c"]));
}

#[rstest]
fn test_cycles_text_none_found(tasks_dir: (TempDir, PathBuf)) {
    let (temp, path) = tasks_dir;
    let output = run_taskrank_in_dir(temp.path(), &["cycles", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No circular dependencies found."));
}

#[rstest]
fn test_cycles_text_lists_ids(temp_dir: TempDir) {
    let output = run_taskrank_with_stdin(
        temp_dir.path(),
        &["cycles"],
        r#"[{"id": "x", "title": "X", "dependencies": ["x"]}]"#,
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 task(s) involved in circular dependencies:"));
    assert!(stdout.contains("  x"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[rstest]
fn test_init_creates_config(temp_dir: TempDir) {
    let output = run_taskrank_in_dir(temp_dir.path(), &["init"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Wrote default configuration"));

    let content = std::fs::read_to_string(temp_dir.path().join("taskrank.yaml")).unwrap();
    assert!(content.contains("default-strategy: smart_balance"));
    assert!(content.contains("suggest-limit: 3"));
}

#[rstest]
fn test_init_quiet_and_json(temp_dir: TempDir) {
    let output = run_taskrank_in_dir(temp_dir.path(), &["init", "--quiet"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let second = TempDir::new().unwrap();
    let output = run_taskrank_in_dir(second.path(), &["init", "--json"]);
    let body = stdout_json(&output);
    assert!(body["config_file"].as_str().unwrap().ends_with("taskrank.yaml"));
}

#[rstest]
fn test_init_twice_fails(temp_dir: TempDir) {
    assert!(run_taskrank_in_dir(temp_dir.path(), &["init", "--quiet"]).status.success());

    let output = run_taskrank_in_dir(temp_dir.path(), &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already configured"));
}

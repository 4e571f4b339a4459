//! Integration tests for the `logwarden` binary.
//!
//! Each test runs the compiled binary against temporary files and checks
//! stdout, stderr separation and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SAMPLE_LOG: &str = "\
2023-10-01 12:00:00 INFO User logged in
2023-10-01 12:05:00 ERROR Failed password attempt
not-enough
2023-10-01 12:10:00 WARN Disk usage at 85%
";

fn logwarden(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logwarden"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("should spawn logwarden binary")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_run_json_report() {
    // Given: a log file and no config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("app.log"), SAMPLE_LOG).expect("should write log");

    // When: running the pipeline with JSON output
    let output = logwarden(
        temp_dir.path(),
        &[
            "run",
            "--source",
            "app.log",
            "--database",
            "test.db",
            "--output",
            "json",
        ],
    );

    // Then: the report is on stdout and the run succeeds
    assert!(output.status.success(), "run should succeed: {:?}", output);
    let report = json_stdout(&output);
    assert_eq!(report["lines_collected"], 4);
    assert_eq!(report["records_parsed"], 3);
    assert_eq!(report["parse_failures"], 1);
    assert_eq!(report["records_stored"], 3);
    assert_eq!(report["alerts"][0]["kind"], "FAILED_LOGIN");
    assert_eq!(report["alerts"][1]["kind"], "ERROR_LEVEL");
    assert_eq!(report["distribution"]["INFO"], 2);
    assert_eq!(report["distribution"]["FAILED_LOGIN"], 1);
    assert!(temp_dir.path().join("test.db").exists());
}

#[test]
fn test_run_uses_config_file_paths() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("auth.log"), SAMPLE_LOG).expect("should write log");
    fs::write(
        temp_dir.path().join("logwarden.toml"),
        "[general]\nlog_format = \"json\"\n\n[pipeline]\nsource_path = \"auth.log\"\ndatabase_path = \"auth.db\"\n",
    )
    .expect("should write config");

    let output = logwarden(temp_dir.path(), &["run", "--output", "json"]);

    assert!(output.status.success(), "run should succeed: {:?}", output);
    assert_eq!(json_stdout(&output)["source"], "auth.log");
    assert!(temp_dir.path().join("auth.db").exists());
}

#[test]
fn test_run_text_report_contains_chart() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("app.log"), SAMPLE_LOG).expect("should write log");

    let output = logwarden(
        temp_dir.path(),
        &["run", "--source", "app.log", "--database", ":memory:"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Distribution"));
    assert!(stdout.contains("Failed login attempt detected at 2023-10-01 12:05:00"));
}

#[test]
fn test_run_missing_source_is_empty_run() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(
        temp_dir.path(),
        &[
            "run",
            "--source",
            "missing.log",
            "--database",
            ":memory:",
            "--output",
            "json",
        ],
    );

    assert!(output.status.success(), "missing source should not be fatal");
    let report = json_stdout(&output);
    assert_eq!(report["lines_collected"], 0);
    assert_eq!(report["records_stored"], 0);
}

#[test]
fn test_run_unavailable_storage_exits_with_code_5() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("app.log"), SAMPLE_LOG).expect("should write log");

    let output = logwarden(
        temp_dir.path(),
        &[
            "run",
            "--source",
            "app.log",
            "--database",
            "no/such/dir/test.db",
        ],
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty(), "no report on fatal failure");
    assert!(String::from_utf8_lossy(&output.stderr).contains("storage unavailable"));
}

#[test]
fn test_query_missing_database_does_not_create_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["query", "--database", "nope.db"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("storage unavailable"));
    assert!(!temp_dir.path().join("nope.db").exists());
}

#[test]
fn test_query_after_run() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("app.log"), SAMPLE_LOG).expect("should write log");

    let run = logwarden(
        temp_dir.path(),
        &["run", "--source", "app.log", "--database", "test.db"],
    );
    assert!(run.status.success());

    let output = logwarden(
        temp_dir.path(),
        &[
            "query",
            "--database",
            "test.db",
            "--level",
            "error",
            "--output",
            "json",
        ],
    );

    assert!(output.status.success(), "query should succeed: {:?}", output);
    let report = json_stdout(&output);
    assert_eq!(report["total"], 1);
    assert_eq!(report["records"][0]["id"], 2);
    assert_eq!(report["records"][0]["message"], "Failed password attempt");
}

#[test]
fn test_config_validate_invalid_value_exits_with_code_2() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("logwarden.toml"),
        "[general]\nlog_level = \"verbose\"\n",
    )
    .expect("should write config");

    let output = logwarden(temp_dir.path(), &["config", "validate", "--output", "json"]);

    assert_eq!(output.status.code(), Some(2));
    let report = json_stdout(&output);
    assert_eq!(report["valid"], false);
    assert!(
        report["errors"][0]
            .as_str()
            .is_some_and(|e| e.contains("log_level"))
    );
}

#[test]
fn test_config_show_defaults_without_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["config", "show", "--output", "json"]);

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["source"], "(defaults)");
    assert_eq!(report["config"]["pipeline"]["database_path"], "logwarden.db");
}

#[test]
fn test_malformed_config_fails_run() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("logwarden.toml"), "[general\nlog_level = \"info\"\n")
        .expect("should write bad config");

    let output = logwarden(temp_dir.path(), &["run"]);

    assert_eq!(output.status.code(), Some(2));
}

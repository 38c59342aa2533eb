//! Integration tests for the tracelens CLI
//!
//! These tests run the tracelens binary against the run documents in
//! `tests/fixtures`.

mod common;

use std::fs;

use common::{fixture, tracelens};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tracelens"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("timeline"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tracelens"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tracelens --help"));
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_human_report() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("analyze")
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Run:         a28c390f-902v-23g1-352f-w7d062e0ds92",
        ))
        .stdout(predicate::str::contains("Steps:       7 (6 succeeded, 1 failed)"))
        .stdout(predicate::str::contains("Score:       8.6 / 10"))
        .stdout(predicate::str::contains("Duration:    5.27s"))
        .stdout(predicate::str::contains("p50 / p95:   756ms / 1.06s"))
        .stdout(predicate::str::contains("Fastest:     log_result (524ms)"))
        .stdout(predicate::str::contains("Calls:       2 model, 5 tool"))
        .stdout(predicate::str::contains("Est. cost:   $0.000225"))
        .stdout(predicate::str::contains("[error] Step 4 \"send_email\" failed"))
        .stdout(predicate::str::contains("SMTP timeout after 1s"))
        .stdout(predicate::str::contains("[high] Add retry logic for failed steps"))
        .stdout(predicate::str::contains("[medium]").not());
}

#[test]
fn test_analyze_json_report() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .args(["--format", "json", "analyze"])
        .arg(fixture("email_run.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["run_id"], "a28c390f-902v-23g1-352f-w7d062e0ds92");
    assert_eq!(value["report"]["total_steps"], 7);
    assert_eq!(value["report"]["score"], 8.6);
    assert_eq!(value["report"]["latency"]["p95_ms"], 1062.0);
    assert_eq!(value["report"]["tokens"]["total"], 1500);
    assert_eq!(value["report"]["failures"][0]["name"], "send_email");
    assert_eq!(value["report"]["step_durations"][3]["label"], "send_ema…");
}

#[test]
fn test_analyze_duration_override_adds_budget_recommendation() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "--duration-ms", "7000"])
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration:    7.00s"))
        .stdout(predicate::str::contains(
            "[medium] Duration exceeds 5s, optimize the critical path",
        ));
}

#[test]
fn test_analyze_negative_duration_is_usage_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "--duration-ms=-5"])
        .arg(fixture("email_run.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid duration-ms"));
}

#[test]
fn test_analyze_encoded_steps_use_recorded_duration() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("analyze")
        .arg(fixture("encoded_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration:    6.40s"))
        .stdout(predicate::str::contains("[success] All steps completed successfully"))
        .stdout(predicate::str::contains("[medium] Duration exceeds 5s"));
}

#[test]
fn test_analyze_selects_run_by_id() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "--run", "run-newer"])
        .arg(fixture("runs.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent:       Hospital Voice Agent"))
        .stdout(predicate::str::contains("[error] Step 2 \"answer\" failed"));
}

#[test]
fn test_analyze_unknown_run_id_is_data_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "--run", "run-missing"])
        .arg(fixture("runs.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no run with id run-missing"));
}

#[test]
fn test_analyze_no_data() {
    let dir = tempdir().unwrap();

    tracelens(dir.path())
        .args(["analyze", "--run", "run-broken"])
        .arg(fixture("runs.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));

    let output = tracelens(dir.path())
        .args(["--format", "json", "analyze", "-"])
        .write_stdin("[]")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "report": null }));
}

#[test]
fn test_analyze_reads_stdin() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "-"])
        .write_stdin(
            r#"[{"step_name": "only", "step_latency": 40, "step_status": "success"}]"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Score:       10.0 / 10"))
        .stdout(predicate::str::contains("Fastest:     only (40ms)"));
}

// ============================================================================
// steps, tokens, timeline, runs
// ============================================================================

#[test]
fn test_steps_table() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("steps")
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("send_email"))
        .stdout(predicate::str::contains("failure"))
        .stdout(predicate::str::contains("1.06s"));
}

#[test]
fn test_tokens_report() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("tokens")
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Token Usage Report ==="))
        .stdout(predicate::str::contains("Total Input Tokens:  1,000"))
        .stdout(predicate::str::contains("Grand Total:         1,500"))
        .stdout(predicate::str::contains("Model Calls:         1"))
        .stdout(predicate::str::contains("Total Steps:         7"));
}

#[test]
fn test_tokens_json() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .args(["--format", "json", "tokens"])
        .arg(fixture("email_run.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["grand_total"], 1500);
    assert_eq!(value["steps"][0]["step_name"], "reasoning");
    assert_eq!(value["steps"][1]["total"], 0);
}

#[test]
fn test_timeline_bars() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["timeline", "--width", "20"])
        .arg(fixture("encoded_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("plan |#   "))
        .stdout(predicate::str::contains("act  | ##  "))
        .stdout(predicate::str::contains("Scale: 6.40s"));
}

#[test]
fn test_timeline_zero_width_is_usage_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["timeline", "--width", "0"])
        .arg(fixture("email_run.json"))
        .assert()
        .code(2);
}

#[test]
fn test_runs_listing_newest_first() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .arg("runs")
        .arg(fixture("runs.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("run-newer"));
    assert!(lines[1].contains("What is the recommended d..."));
    assert!(lines[2].starts_with("run-older"));
    assert!(lines[3].starts_with("run-broken"));
}

// ============================================================================
// pricing and config
// ============================================================================

#[test]
fn test_pricing_builtin() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .arg("pricing")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_local_config_changes_cost() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tracelens.toml"),
        "[pricing.providers.Gemini]\ninput_per_million = 10.0\noutput_per_million = 20.0\n",
    )
    .unwrap();

    tracelens(dir.path())
        .arg("analyze")
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Est. cost:   $0.020000"));
}

#[test]
fn test_explicit_missing_config_is_data_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["--config", "nope.toml", "pricing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_config_from_env() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        "[pricing.default]\ninput_per_million = 1.0\noutput_per_million = 2.0\n",
    )
    .unwrap();

    tracelens(dir.path())
        .env("TRACELENS_CONFIG", &path)
        .arg("pricing")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1.000"))
        .stdout(predicate::str::contains("gemini").not());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: input not found"));
}

#[test]
fn test_missing_input_file_json_envelope() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .args(["--format", "json", "analyze", "missing.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["code"], 3);
    assert_eq!(value["error"]["type"], "input_not_found");
}

#[test]
fn test_malformed_document_is_data_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "-"])
        .write_stdin("{not json")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid run document"));
}

#[test]
fn test_unknown_format_is_usage_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["--format", "xml", "pricing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn test_usage_error_with_json_format() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .args(["--format", "json", "analyze"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["type"], "usage_error");
}

#[test]
fn test_quiet_suppresses_error_text() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["--quiet", "analyze", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Step details and malformed steps
// ============================================================================

#[test]
fn test_step_detail_shows_error_and_payloads() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["steps", "--step", "4"])
        .arg(fixture("email_run.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Step 4 of 7: send_email\n"))
        .stdout(predicate::str::contains("Error:\n  SMTP timeout after 1s"));
}

#[test]
fn test_step_detail_json_keeps_store_fields() {
    let dir = tempdir().unwrap();
    let output = tracelens(dir.path())
        .args(["--format", "json", "steps", "--step", "1", "-"])
        .write_stdin(
            r#"[{"step_name": "plan", "step_input": {"q": "hi"}, "step_output": "ok",
                 "step_end_time": "2025-11-11T02:27:33Z"}]"#,
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["index"], 1);
    assert_eq!(value["step"]["step_input"]["q"], "hi");
    assert_eq!(value["step"]["step_output"], "ok");
    assert_eq!(value["step"]["step_end_time"], "2025-11-11T02:27:33Z");
}

#[test]
fn test_step_detail_out_of_range_is_usage_error() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["steps", "--step", "8"])
        .arg(fixture("email_run.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("run has 7 steps"));
}

#[test]
fn test_null_step_counts_as_unknown_failure() {
    let dir = tempdir().unwrap();
    tracelens(dir.path())
        .args(["analyze", "-"])
        .write_stdin(r#"{"run_id": "r1", "steps": [{"step_name": "a", "step_status": "success"}, null]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps:       2 (1 succeeded, 1 failed)"))
        .stdout(predicate::str::contains("[error] Step 2 "));
}

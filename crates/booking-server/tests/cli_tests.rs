//! Integration tests for the `booking` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the `resolve` subcommand
//! through the actual binary, covering stdin/stdout piping, file I/O,
//! environment configuration, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the busy.json fixture.
fn busy_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/busy.json")
}

/// Helper: the binary with slot settings pinned, so ambient environment
/// variables cannot change the expected output.
fn booking() -> Command {
    let mut cmd = Command::cargo_bin("booking").unwrap();
    for var in [
        "BOOKING_TIMEZONE",
        "DAY_START_HOUR",
        "DAY_END_HOUR",
        "SLOT_DURATION_HOURS",
        "BUFFER_MINUTES",
        "EXCLUDED_WEEKDAYS",
        "TIME_FORMAT",
        "LOG_JSON",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn parse(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_from_file_applies_busy_time() {
    // busy.json: Monday 13:00-15:00 New York, Tuesday 09:00-20:00 New York.
    let output = booking()
        .args([
            "resolve",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-17",
            "-i",
            busy_json_path(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse(&output);
    assert_eq!(json["source"], "live");
    assert_eq!(
        json["days"][0],
        serde_json::json!({
            "date": "2026-03-16",
            "slots": ["09:00", "10:00", "16:00", "17:00", "18:00"]
        })
    );
    assert_eq!(json["days"][1]["slots"], serde_json::json!([]));
}

#[test]
fn resolve_reads_stdin() {
    booking()
        .args(["resolve", "--start", "2026-03-16", "--end", "2026-03-16"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"09:00\""))
        .stdout(predicate::str::contains("\"18:00\""))
        .stdout(predicate::str::contains("\"19:00\"").not());
}

#[test]
fn resolve_skips_excluded_weekdays() {
    let output = booking()
        .args(["resolve", "--start", "2026-03-21", "--end", "2026-03-23"])
        .write_stdin("[]")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let dates: Vec<String> = parse(&output)["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2026-03-21", "2026-03-23"]);
}

#[test]
fn resolve_honours_environment_configuration() {
    let output = booking()
        .env("BUFFER_MINUTES", "0")
        .env("EXCLUDED_WEEKDAYS", "mon")
        .args([
            "resolve",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-17",
            "-i",
            busy_json_path(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse(&output);
    let days = json["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2026-03-17");
}

#[test]
fn resolve_mock_prints_fallback_schedule() {
    booking()
        .args([
            "resolve",
            "--start",
            "2026-03-21",
            "--end",
            "2026-03-21",
            "--mock",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"mock\""))
        .stdout(predicate::str::contains("\"10:00\""));
}

#[test]
fn resolve_writes_output_file() {
    let output_path = "/tmp/booking-test-resolve-output.json";
    let _ = std::fs::remove_file(output_path);

    booking()
        .args([
            "resolve",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-16",
            "-i",
            busy_json_path(),
            "-o",
            output_path,
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("2026-03-16"));
    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_date_fails() {
    booking()
        .args(["resolve", "--start", "2026-03-32", "--end", "2026-04-01"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn reversed_range_fails() {
    booking()
        .args(["resolve", "--start", "2026-03-20", "--end", "2026-03-16"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("after end"));
}

#[test]
fn malformed_busy_json_fails() {
    booking()
        .args(["resolve", "--start", "2026-03-16", "--end", "2026-03-16"])
        .write_stdin("{\"busy\": true}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse busy intervals"));
}

#[test]
fn invalid_hours_fail_configuration() {
    booking()
        .env("DAY_START_HOUR", "22")
        .args(["resolve", "--start", "2026-03-16", "--end", "2026-03-16"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid slot configuration"));
}

#[test]
fn unknown_timezone_rejected() {
    booking()
        .args([
            "resolve",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-16",
            "--timezone",
            "Atlantis/Central",
        ])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Atlantis/Central"));
}

#[test]
fn missing_input_file_fails() {
    booking()
        .args([
            "resolve",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-16",
            "-i",
            "/nonexistent/busy.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn help_lists_subcommands() {
    booking()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("resolve"));
}

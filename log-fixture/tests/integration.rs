use asserting::prelude::*;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::Value;
use std::{fs, path::Path, process::Command};

const LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];
const SERVICES: [&str; 10] = [
    "api-gateway",
    "api-users",
    "api-orders",
    "api-payments",
    "api-inventory",
    "worker-email",
    "worker-notifications",
    "worker-analytics",
    "cache-redis",
    "db-postgres",
];

fn run(args: &[&str], dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_log-fixture"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to start log-fixture")
}

fn read_records(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .expect("output file missing")
        .lines()
        .map(|line| serde_json::from_str(line).expect("line is not JSON"))
        .collect()
}

fn timestamp_of(record: &Value) -> NaiveDateTime {
    let text = record["timestamp"].as_str().unwrap();
    let naive = text.strip_suffix('Z').expect("timestamp lacks Z suffix");
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
}

#[test]
fn writes_ten_records_across_the_day() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["10", "out.jsonl"], dir.path());
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Generating 10 log lines to out.jsonl..."));
    assert!(stdout.contains("Done! Generated out.jsonl"));
    assert!(stdout.contains("File size: "));

    let records = read_records(&dir.path().join("out.jsonl"));
    assert_that!(records.len()).is_equal_to(10);

    let epoch = NaiveDate::from_ymd_opt(2026, 1, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let tolerance = TimeDelta::milliseconds(500);
    let stamps: Vec<NaiveDateTime> = records.iter().map(timestamp_of).collect();
    assert!((stamps[0] - epoch).abs() <= tolerance);
    let last_nominal = epoch + TimeDelta::seconds(9 * 8_640);
    assert!((stamps[9] - last_nominal).abs() <= tolerance);
    for pair in stamps.windows(2) {
        assert!(pair[1] + tolerance * 2 >= pair[0]);
    }
}

#[test]
fn every_record_follows_the_schema() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["5000", "schema.jsonl"], dir.path());
    assert!(output.status.success(), "{output:?}");

    for record in read_records(&dir.path().join("schema.jsonl")) {
        let level = record["level"].as_str().unwrap();
        let service = record["service"].as_str().unwrap();
        assert!(LEVELS.contains(&level), "{record}");
        assert!(SERVICES.contains(&service), "{record}");
        assert!(record["msg"].is_string());
        timestamp_of(&record);

        if service.starts_with("api-") {
            assert!(record["path"].is_string());
            assert!(record["method"].is_string());
            let latency = record["latency"].as_u64().expect("integer latency");
            if level == "warn" {
                assert!((500..=5000).contains(&latency), "{record}");
            } else {
                assert!((1..=500).contains(&latency), "{record}");
            }
            let status = record["status"].as_u64().unwrap();
            let allowed: &[u64] = match level {
                "debug" => &[200],
                "info" => &[200, 201, 204],
                "warn" => &[400, 401, 403, 404, 429],
                _ => &[500, 502, 503, 504, 400, 401, 403],
            };
            assert!(allowed.contains(&status), "{record}");
        } else {
            assert!(record.get("latency").is_none(), "{record}");
        }

        if let Some(request) = record.get("request") {
            for key in ["id", "client_ip", "user_agent"] {
                assert!(request[key].is_string(), "{record}");
            }
        }
        assert_that!(record.get("trace_id").is_some())
            .is_equal_to(record.get("span_id").is_some());
    }
}

#[test]
fn repeated_runs_agree_on_line_count() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.jsonl", "b.jsonl"] {
        let output = run(&["250", name], dir.path());
        assert!(output.status.success(), "{output:?}");
    }
    let a = read_records(&dir.path().join("a.jsonl"));
    let b = read_records(&dir.path().join("b.jsonl"));
    assert_that!(a.len()).is_equal_to(250);
    assert_that!(b.len()).is_equal_to(250);
}

#[test]
fn zero_lines_is_rejected_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["0", "zero.jsonl"], dir.path());
    assert!(!output.status.success());
    assert!(!dir.path().join("zero.jsonl").exists());
}

#[test]
fn non_numeric_count_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["many"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["5", "no/such/dir/out.jsonl"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Create"), "{stderr}");
}

#[test]
fn debug_logging_reports_arguments_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_log-fixture"))
        .args(["3", "logged.jsonl"])
        .env("RUST_LOG", "debug")
        .current_dir(dir.path())
        .output()
        .expect("Failed to start log-fixture");
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("parsed arguments"), "{stderr}");
    assert!(stderr.contains("computed schedule"), "{stderr}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("parsed arguments"));
}

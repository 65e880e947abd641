#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_apienvelope"));
    cmd.arg("--log-level").arg("error");
    cmd
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should be writable");
    child.wait_with_output().expect("command should finish")
}

fn build_cars_envelope() -> Vec<u8> {
    let output = bin()
        .args([
            "build",
            "--api-version",
            "0.1",
            "--method",
            "cars.get",
            "--param",
            "region=eu",
            "--kind",
            "car",
            "--field",
            "color,type",
            "--item",
            r#"{"color":"red","type":"SUV"}"#,
            "--item",
            r#"{"color":"blue","type":"coupe"}"#,
        ])
        .output()
        .expect("build should run");
    assert!(output.status.success(), "build failed: {output:?}");
    output.stdout
}

fn temp_file(tag: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "apienvelope-{tag}-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}

#[test]
fn build_emits_style_guide_envelope() {
    let stdout = build_cars_envelope();
    let value: Value = serde_json::from_slice(&stdout).expect("build output should be json");

    assert_eq!(value["apiVersion"], "0.1");
    assert_eq!(value["method"], "cars.get");
    assert_eq!(value["params"]["region"], "eu");
    assert_eq!(value["data"]["currentItemCount"], 2);
    assert_eq!(value["data"]["deleted"], false);
    assert_eq!(value["data"]["fields"], "color,type");
    assert_eq!(value["data"]["items"][1]["type"], "coupe");
    assert!(value.get("error").is_none());
}

#[test]
fn inspect_reads_stdin_as_json_summary() {
    let envelope = build_cars_envelope();
    let output = run_with_stdin(&["inspect", "--format", "json"], &envelope);
    assert!(output.status.success(), "inspect failed: {output:?}");

    let summary: Value = serde_json::from_slice(&output.stdout).expect("summary should be json");
    assert_eq!(summary["apiVersion"], "0.1");
    assert_eq!(summary["itemCount"], 2);
    assert_eq!(summary["params"]["region"], "eu");
}

#[test]
fn items_walks_cursor_from_file() {
    let path = temp_file("items", &build_cars_envelope());
    let output = bin()
        .args(["items", "--format", "json"])
        .arg(&path)
        .output()
        .expect("items should run");
    let _ = std::fs::remove_file(&path);
    assert!(output.status.success(), "items failed: {output:?}");

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .expect("output should be utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["index"], 0);
    assert_eq!(lines[0]["item"]["color"], "red");
    assert_eq!(lines[1]["index"], 1);
    assert_eq!(lines[1]["item"]["color"], "blue");
}

#[test]
fn stamp_keeps_metadata_and_drops_items() {
    let envelope = build_cars_envelope();
    let output = run_with_stdin(&["stamp", "--context", "req-9"], &envelope);
    assert!(output.status.success(), "stamp failed: {output:?}");

    let value: Value = serde_json::from_slice(&output.stdout).expect("stamp output should be json");
    assert_eq!(value["apiVersion"], "0.1");
    assert_eq!(value["method"], "cars.get");
    assert_eq!(value["context"], "req-9");
    assert_eq!(value["params"]["region"], "eu");
    assert_eq!(value["data"], serde_json::json!({"deleted": false}));
}

#[test]
fn malformed_input_exits_data_invalid() {
    let output = run_with_stdin(&["inspect", "--format", "json"], b"{\"data\": 7}");
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to decode envelope"), "stderr: {stderr}");
}

#[test]
fn empty_input_exits_data_invalid() {
    let output = run_with_stdin(&["items"], b"");
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn invalid_item_exits_usage() {
    let output = bin()
        .args(["build", "--item", "{nope"])
        .output()
        .expect("build should run");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn oversized_input_rejected_by_max_size() {
    let envelope = build_cars_envelope();
    let output = run_with_stdin(&["inspect", "--max-size", "16"], &envelope);
    assert_eq!(output.status.code(), Some(60));
}

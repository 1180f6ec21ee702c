//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "reveille-cli", "--"])
        .args(args)
        .env("REVEILLE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_alarm_list() {
    let (_, _, code) = run_cli(&["alarm", "list"]);
    assert_eq!(code, 0, "alarm list failed");
}

#[test]
fn test_alarm_list_json_parses() {
    let (stdout, _, code) = run_cli(&["alarm", "list", "--json"]);
    assert_eq!(code, 0, "alarm list --json failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("list --json must emit JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_alarm_methods_catalog() {
    let (stdout, _, code) = run_cli(&["alarm", "methods"]);
    assert_eq!(code, 0, "alarm methods failed");
    assert!(stdout.contains("Shake"));
    assert!(stdout.contains("Math 1"));
    assert!(stdout.contains("Factor"));
}

#[test]
fn test_alarm_tones_catalog() {
    let (stdout, _, code) = run_cli(&["alarm", "tones"]);
    assert_eq!(code, 0, "alarm tones failed");
    assert!(stdout.contains("1005"));
}

#[test]
fn test_alarm_add_duplicate_is_soft_rejected() {
    let label = format!("dup-test-{}", std::process::id());
    let (first, _, code) = run_cli(&["alarm", "add", "03:14", "--label", &label]);
    assert_eq!(code, 0, "alarm add failed");
    assert!(first.contains("Added"));

    let (second, _, code) = run_cli(&["alarm", "add", "03:14", "--label", &label]);
    assert_eq!(code, 0, "duplicate add must not be a hard error");
    assert!(second.contains("already exists"));

    // Clean up: remove the alarm we created by finding its index.
    let (json, _, _) = run_cli(&["alarm", "list", "--json"]);
    if let Ok(serde_json::Value::Array(alarms)) = serde_json::from_str(&json) {
        if let Some(index) = alarms.iter().position(|a| a["text"] == label.as_str()) {
            let (_, _, code) = run_cli(&["alarm", "remove", &index.to_string()]);
            assert_eq!(code, 0, "alarm remove failed");
        }
    }
}

#[test]
fn test_alarm_add_rejects_bad_time() {
    let (_, stderr, code) = run_cli(&["alarm", "add", "25:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));
}

#[test]
fn test_stopwatch_status() {
    let (stdout, _, code) = run_cli(&["stopwatch", "status"]);
    assert_eq!(code, 0, "stopwatch status failed");
    assert!(stdout.contains(':'), "expected HH:MM:SS output");
}

#[test]
fn test_config_list_and_get() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());

    let (stdout, _, code) = run_cli(&["config", "get", "default_wake_method"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

//! CLI tests for the `f10cfg explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn f10cfg_cmd() -> Command {
    Command::new(cargo::cargo_bin!("f10cfg"))
}

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = f10cfg_cmd()
        .args(["explain", "FTOS1202", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "FTOS1202");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = f10cfg_cmd()
        .args(["explain", "FTOS9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "FTOS9999");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = f10cfg_cmd()
        .args(["explain", "FTOS1001", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("FTOS1001") && stdout.contains(':'),
        "unexpected output: {stdout}"
    );
}

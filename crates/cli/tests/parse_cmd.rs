//! CLI tests for `f10cfg parse`, `check` and `tree`.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const VALID: &str = "\
hostname edge1
!
interface GigabitEthernet 0/1
 description uplink
 no shutdown
!
redundancy auto-synchronize full
hardware watchdog
end
";

fn f10cfg_cmd() -> Command {
    Command::new(cargo::cargo_bin!("f10cfg"))
}

fn write_temp_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("running-config.txt");
    fs::write(&path, content).expect("write temp config");
    (dir, path.to_string_lossy().to_string())
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn parse_json_prints_model() {
    let (_dir, path) = write_temp_config(VALID);
    let output = f10cfg_cmd()
        .args(["parse", &path, "--output", "json"])
        .output()
        .expect("run parse command");

    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["ok"], true);
    assert_eq!(json["config"]["hostname"], "edge1");
    let port = &json["config"]["interfaces"]["GigabitEthernet 0/1"];
    assert_eq!(port["description"], "uplink");
    assert_eq!(port["shutdown"], false);
    assert!(json["config"]["vlans"]["1"].is_object());
}

#[test]
fn parse_reads_stdin() {
    let mut child = f10cfg_cmd()
        .args(["parse", "-", "--output", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn parse command");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(VALID.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait for parse");

    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["config"]["hostname"], "edge1");
}

#[test]
fn parse_error_emits_diagnostic_envelope() {
    let (_dir, path) = write_temp_config(
        "interface Vlan 10\n tagged GigabitEthernet 1/11-1/16\nend\n",
    );
    let output = f10cfg_cmd()
        .args(["parse", &path, "--permissive", "--output", "json"])
        .output()
        .expect("run parse command");

    assert_eq!(output.status.code(), Some(1));
    let json = json_stdout(&output);
    assert_eq!(json["ok"], false);
    assert_eq!(json["diagnostic"]["id"], "FTOS1202");
    assert_eq!(json["diagnostic"]["line"], 2);
    let chain = json["chain"].as_array().expect("chain array");
    assert!(chain.len() >= 3, "chain too short: {chain:?}");
    assert!(chain[0].as_str().unwrap().contains("interface"));
}

#[test]
fn check_enforces_default_profile() {
    let (_dir, path) = write_temp_config("hostname edge1\nend\n");

    let output = f10cfg_cmd()
        .args(["check", &path, "--output", "json"])
        .output()
        .expect("run check command");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json_stdout(&output)["diagnostic"]["id"], "FTOS1301");

    let output = f10cfg_cmd()
        .args(["check", &path, "--permissive", "--output", "json"])
        .output()
        .expect("run check command");
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["ok"], true);
}

#[test]
fn check_with_custom_profile() {
    let (dir, path) = write_temp_config("hardware watchdog\nend\n");
    let profile = dir.path().join("profile.json");
    fs::write(
        &profile,
        r#"{
            "id": "lab",
            "schema_version": "1.0.0",
            "expected_sections": { "hardware": [["hardware", "watchdog"]] }
        }"#,
    )
    .expect("write profile");

    let output = f10cfg_cmd()
        .args(["check", &path, "--profile"])
        .arg(&profile)
        .args(["--output", "json"])
        .output()
        .expect("run check command");
    assert!(output.status.success());
}

#[test]
fn profile_and_permissive_conflict() {
    let (_dir, path) = write_temp_config(VALID);
    let output = f10cfg_cmd()
        .args(["check", &path, "--permissive", "--profile", "p.json"])
        .output()
        .expect("run check command");
    assert!(!output.status.success());
}

#[test]
fn check_pretty_renders_source_line() {
    let (_dir, path) = write_temp_config("hostname edge1\nfrobnicate now\nend\n");
    let output = f10cfg_cmd()
        .args(["check", &path, "--permissive", "--output", "pretty"])
        .output()
        .expect("run check command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FTOS1001"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("frobnicate"), "unexpected stderr: {stderr}");
}

#[test]
fn missing_file_emits_json_error_envelope() {
    let output = f10cfg_cmd()
        .args(["parse", "nope-does-not-exist.conf", "--output", "json"])
        .output()
        .expect("run parse command");

    assert!(!output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to read")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn tree_prints_nested_sections() {
    let (_dir, path) = write_temp_config(VALID);
    let output = f10cfg_cmd()
        .args(["tree", &path, "--output", "json"])
        .output()
        .expect("run tree command");

    assert!(output.status.success());
    let json = json_stdout(&output);
    let tree = json.as_array().expect("tree array");
    assert_eq!(tree.len(), 5);
    assert_eq!(tree[1]["words"][0], "interface");
    assert_eq!(tree[1]["children"][1]["words"], serde_json::json!(["no", "shutdown"]));
}

#[test]
fn samples_all_check() {
    let samples = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../samples");
    for entry in fs::read_dir(&samples).expect("samples") {
        let path = entry.expect("entry").path();
        if path.extension().and_then(|s| s.to_str()) != Some("conf") {
            continue;
        }
        let output = f10cfg_cmd()
            .arg("check")
            .arg(&path)
            .args(["--output", "json"])
            .output()
            .expect("run check command");
        assert!(
            output.status.success(),
            "check failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

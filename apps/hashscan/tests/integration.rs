//! Integration tests for the hashscan CLI

use std::path::Path;
use std::process::{Command, Output};

const SAMPLE: &str = "275a021bbfb6489e54d471899f7db9d1663fc695ec2fe2a2c4538aabf651fd0f";
const OTHER: &str = "44d88612fea8a8f36de82e1278abb02f";
/// Nothing listens on the discard port
const UNREACHABLE: &str = "http://127.0.0.1:9/api/v3";

fn hashscan(config: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hashscan"));
    for (name, _) in std::env::vars() {
        if name.starts_with("HASHSCAN_") || name == "RUST_LOG" {
            command.env_remove(name);
        }
    }
    command
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute hashscan")
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[analyzer]\nmin_cycle_duration_ms = 0\n\n[api]\nbase_url = \"{UNREACHABLE}\"\napi_key = \"test\"\n"
        ),
    )
    .unwrap();
    path
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_hashscan"))
        .arg("--version")
        .output()
        .expect("Failed to execute hashscan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hashscan"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_hashscan"))
        .arg("--help")
        .output()
        .expect("Failed to execute hashscan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("threat-intelligence"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_invalid_hash_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = hashscan(&config, &["check", "not-a-digest"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hash"));
}

#[test]
fn test_missing_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = hashscan(&dir.path().join("absent.toml"), &["check", SAMPLE]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_sentinel_reports_threat() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = hashscan(
        &config,
        &["--json", "check", SAMPLE, "--test-mode", "--sentinel", SAMPLE],
    );
    assert_eq!(output.status.code(), Some(2));

    let report = json_stdout(&output);
    assert_eq!(report["results"][0]["hash"], SAMPLE);
    assert_eq!(report["results"][0]["status"], "virus_found");
    assert_eq!(report["tally"]["threats"], 1);
    assert_eq!(report["rounds"], 1);
}

#[test]
fn test_unreachable_provider_yields_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let list = dir.path().join("hashes.txt");
    std::fs::write(&list, format!("# batch\n{OTHER}\n")).unwrap();

    let output = hashscan(
        &config,
        &["--json", "check", "--from-file", list.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));

    let report = json_stdout(&output);
    assert_eq!(report["results"][0]["status"], "error");
    assert_eq!(report["tally"]["errors"], 1);
    assert_eq!(report["tally"]["unfinished"], 1);
}

#[test]
fn test_zero_concurrency_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = hashscan(&config, &["check", SAMPLE, "--concurrency", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_api_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, format!("[api]\nbase_url = \"{UNREACHABLE}\"\n")).unwrap();

    let output = hashscan(&config, &["check", SAMPLE]);
    assert_eq!(output.status.code(), Some(1));

    let output = hashscan(
        &config,
        &["--json", "check", SAMPLE, "--test-mode", "--sentinel", SAMPLE],
    );
    assert_eq!(output.status.code(), Some(2));
}

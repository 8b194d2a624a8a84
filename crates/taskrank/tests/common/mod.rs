//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Path to the taskrank binary built for this test run
pub fn taskrank_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_taskrank"))
}

fn taskrank_command(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(taskrank_binary());
    command
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    command
}

/// Run the taskrank binary in the specified directory
pub fn run_taskrank_in_dir(dir: &Path, args: &[&str]) -> Output {
    taskrank_command(dir, args)
        .output()
        .expect("Failed to execute taskrank binary")
}

/// Run the taskrank binary with `input` piped to stdin
pub fn run_taskrank_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = taskrank_command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn taskrank binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child
        .wait_with_output()
        .expect("Failed to wait for taskrank binary")
}

/// Write a tasks payload into `dir` and return its path
pub fn write_tasks(dir: &Path, name: &str, payload: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(payload).unwrap())
        .expect("Failed to write tasks file");
    path
}

/// Parse stdout as JSON, failing the test with stderr on error
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

//! Common test utilities for TUI tests.

use std::process::Command;

/// Config path that never exists, so a developer's own config cannot leak
/// into the tests.
const NO_CONFIG: &str = "/nonexistent/bbviz-test/config.toml";

/// Runs bbviz in headless mode against the built-in sample data.
///
/// Returns (exit code, stdout, stderr).
pub fn run_headless(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_bbviz"))
        .args(["--config", NO_CONFIG, "--headless", "--mock-data"])
        .args(args)
        .env_remove("BBVIZ_HITTERS")
        .env_remove("BBVIZ_PITCHERS")
        .output()
        .expect("Failed to execute bbviz");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// Runs a script and returns parsed JSON output.
pub fn run_json(events: &str) -> (i32, serde_json::Value) {
    let (code, stdout, stderr) = run_headless(&["--events", events, "--output", "json"]);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON ({e}). stdout: {stdout}\nstderr: {stderr}"));
    (code, json)
}

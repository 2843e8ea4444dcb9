//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command with `input` on stdin and return (stdout, stderr, code).
fn run_cli_with_input(
    dir: &TempDir,
    args: &[&str],
    input: impl AsRef<[u8]>,
) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomodoro"))
        .args(args)
        .env("POMODORO_CONFIG_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_ref())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(dir, args, "")
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is JSON"))
        .collect()
}

fn count_type(events: &[serde_json::Value], kind: &str) -> usize {
    events.iter().filter(|e| e["type"] == kind).count()
}

#[test]
fn test_config_list_shows_defaults() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "list"]);
    assert_eq!(code, 0, "config list failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["timer"]["work_minutes"], 30);
    assert_eq!(parsed["timer"]["break_minutes"], 5);
    assert_eq!(parsed["timer"]["auto_restart"], true);
}

#[test]
fn test_config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "set", "timer.work_minutes", "25"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");
    assert!(dir.path().join("config.toml").exists());

    let (stdout, _, code) = run_cli(&dir, &["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "timer.work_minutes", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("timer.work_minutes"), "stderr: {stderr}");

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_path_uses_override_dir() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
    assert!(stdout.contains(&*dir.path().to_string_lossy()));
}

#[test]
fn test_run_status_and_quit() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(&dir, &["run", "--json"], "status\nquit\n");
    assert_eq!(code, 0);

    let events = json_lines(&stdout);
    assert_eq!(count_type(&events, "state_snapshot"), 2);
    assert_eq!(events[0]["countdown"], "30:00");
    assert_eq!(events[0]["status"], "stopped");
    assert_eq!(events[0]["phase_label"], "Work");
}

#[test]
fn test_run_invalid_minutes_rejected_on_start() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_cli_with_input(&dir, &["run", "--json"], "work abc\nstart\nstatus\nquit\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("Invalid work minutes 'abc'"), "stderr: {stderr}");

    let events = json_lines(&stdout);
    assert_eq!(count_type(&events, "timer_started"), 0);
    let last = events.last().unwrap();
    assert_eq!(last["status"], "stopped");
    assert_eq!(last["work_input"], "abc");
}

#[test]
fn test_run_survives_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_input(
        &dir,
        &["run", "--json"],
        b"start\n\xff\xfe\nstatus\nquit\n",
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("unknown command"), "stderr: {stderr}");

    let events = json_lines(&stdout);
    assert_eq!(count_type(&events, "timer_started"), 1);
    let last = events.last().unwrap();
    assert_eq!(last["type"], "state_snapshot");
    assert_eq!(last["status"], "running");
}

#[test]
fn test_run_exits_on_eof_while_paused() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(&dir, &["run", "--json"], "start\npause\n");
    assert_eq!(code, 0);

    let events = json_lines(&stdout);
    assert_eq!(events.last().unwrap()["type"], "timer_paused");
}

#[test]
fn test_run_stop_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) =
        run_cli_with_input(&dir, &["run", "--json", "--work", "10"], "work abc\nstop\nquit\n");
    assert_eq!(code, 0);

    let events = json_lines(&stdout);
    let stopped: Vec<_> = events.iter().filter(|e| e["type"] == "timer_stopped").collect();
    assert_eq!(stopped.len(), 1);
    assert_eq!(stopped[0]["remaining_secs"], 1800);
}

#[test]
fn test_run_single_cycle_to_completion() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_input(
        &dir,
        &["run", "--json", "--work", "1", "--no-loop", "--tick-ms", "1"],
        "start\n",
    );
    assert_eq!(code, 0);

    let events = json_lines(&stdout);
    assert_eq!(count_type(&events, "timer_started"), 1);
    assert_eq!(count_type(&events, "ticked"), 60);
    assert_eq!(count_type(&events, "phase_expired"), 1);
    assert_eq!(events.last().unwrap()["type"], "cycle_completed");
    assert!(stderr.contains("Time's up!"), "stderr: {stderr}");
}

#[test]
fn test_run_no_sound_is_silent() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli_with_input(
        &dir,
        &["run", "--json", "--work", "1", "--no-loop", "--no-sound", "--tick-ms", "1"],
        "start\n",
    );
    assert_eq!(code, 0);
    assert!(!stderr.contains("Time's up!"), "stderr: {stderr}");
}

#[test]
fn test_run_human_output() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(&dir, &["run"], "loop off\nhelp\nquit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("30:00"));
    assert!(stdout.contains("[loop off]"));
    assert!(stdout.contains("commands:"));
}

#[test]
fn test_run_rejects_invalid_flag_minutes() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["run", "--break", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid break minutes '0'"), "stderr: {stderr}");
}

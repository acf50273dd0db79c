//! Integration tests for the termdeck binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Command for the built binary, logging into `dir` and reading a config from it
fn termdeck(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_termdeck"));
    command
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("TERMDECK_LOG_FILE_PATH", dir.join("termdeck.log"))
        .args(["--config-file", "termdeck.toml"]);
    command
}

/// Run `interactive --simple` feeding `input` on stdin
fn run_simple(dir: &Path, extra_env: &[(&str, &str)], input: &str) -> Output {
    let mut command = termdeck(dir);
    command
        .args(["interactive", "--simple"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in extra_env {
        command.env(key, value);
    }

    let mut child = command.spawn().expect("Failed to start termdeck");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write console input");

    child.wait_with_output().expect("Failed to wait for termdeck")
}

/// Test that the help command works
#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = termdeck(dir.path()).arg("--help").output().unwrap();

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: termdeck"), "Should show usage");
    assert!(stdout.contains("interactive"), "Should show interactive command");
    assert!(stdout.contains("config"), "Should show config command");
    assert!(stdout.contains("--dry-run"), "Should show dry-run flag");
}

/// Test that the version command works
#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = termdeck(dir.path()).arg("--version").output().unwrap();

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("termdeck"), "Should show binary name");
    assert!(stdout.contains("0.1.0"), "Should show version number");
}

/// Test config show falls back to defaults without a config file
#[test]
fn test_config_show_command() {
    let dir = TempDir::new().unwrap();
    let output = termdeck(dir.path()).args(["config", "show"]).output().unwrap();

    assert!(output.status.success(), "Config show should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[console]"), "Should show console section");
    assert!(stdout.contains("prompt = \"guest:~$ \""), "Should show default prompt");
    assert!(stdout.contains("on_last_exit = \"restart\""), "Should show exit policy");
}

/// Test config reset writes a loadable file
#[test]
fn test_config_reset_command() {
    let dir = TempDir::new().unwrap();
    let output = termdeck(dir.path()).args(["config", "reset"]).output().unwrap();

    assert!(output.status.success(), "Config reset should succeed");
    let written = std::fs::read_to_string(dir.path().join("termdeck.toml")).unwrap();
    assert!(written.contains("welcome_command = \"motd\""));
}

/// Test dry-run prints the configuration and exits
#[test]
fn test_dry_run_mode() {
    let dir = TempDir::new().unwrap();
    let output = termdeck(dir.path()).arg("--dry-run").output().unwrap();

    assert!(output.status.success(), "Dry-run should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome command:  motd"));
    assert!(stdout.contains("Dry-run complete"));
}

/// Test a nested terminal session through the line-oriented console
#[test]
fn test_simple_console_transcript() {
    let dir = TempDir::new().unwrap();
    let output = run_simple(
        dir.path(),
        &[],
        "whoami\nterminal\nhelp\nexit\nbogus\n",
    );

    assert!(output.status.success(), "Console should exit cleanly on EOF");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.matches("Welcome to termdeck!").count(),
        2,
        "Root and child should both greet"
    );
    assert!(stdout.contains("guest:~$ whoami\nHi, I'm Guest\n"));
    assert!(stdout.contains("Available commands:\n  clear - Clear terminal output\n"));
    assert!(stdout.contains("New terminal process created.\nProcess terminated.\n"));
    assert!(stdout.contains("Command not found: bogus\n"));

    let log = std::fs::read_to_string(dir.path().join("termdeck.log")).unwrap();
    assert!(log.contains("Launched process-2 (parent process-1)"));
}

/// Test that the last exit quits when configured to
#[test]
fn test_simple_console_quits_after_last_exit() {
    let dir = TempDir::new().unwrap();
    let output = run_simple(
        dir.path(),
        &[("TERMDECK_ON_LAST_EXIT", "quit"), ("TERMDECK_WELCOME_COMMAND", "")],
        "exit\nwhoami\n",
    );

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("guest:~$ exit\n"));
    assert!(!stdout.contains("Hi, I'm Guest"), "Input after quitting is ignored");
}

/// Test that the last exit restarts a fresh console by default
#[test]
fn test_simple_console_restarts_after_last_exit() {
    let dir = TempDir::new().unwrap();
    let output = run_simple(
        dir.path(),
        &[("TERMDECK_WELCOME_COMMAND", ""), ("TERMDECK_PROMPT", "> ")],
        "exit\nwhoami\n",
    );

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "> exit\n> whoami\nHi, I'm Guest\n> \n");
}

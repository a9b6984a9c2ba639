//! Integration tests for the clipabit CLI.

use std::process::Command;
use tempfile::TempDir;

/// Test context that points HOME at a throwaway directory so a run can
/// never touch the real user profile.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn installer_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_clipabit-install");
        let mut cmd = Command::new(bin_path);
        cmd.env("HOME", self.temp_dir.path());
        cmd
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .installer_cmd()
        .arg("--help")
        .output()
        .expect("failed to run installer");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("install"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .installer_cmd()
        .arg("--version")
        .output()
        .expect("failed to run installer");
    assert!(output.status.success());
}

// The first gate rejects anything that is not macOS or Windows, before any
// filesystem mutation. A Linux build host exercises exactly that path.
#[cfg(target_os = "linux")]
#[test]
fn test_unsupported_platform_aborts_with_exit_code_one() {
    let ctx = TestContext::new();
    let output = ctx
        .installer_cmd()
        .output()
        .expect("failed to run installer");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported platform"),
        "diagnostic should name the gate: {stderr}"
    );

    // Nothing may be created under HOME before the abort.
    let entries: Vec<_> = std::fs::read_dir(ctx.temp_dir.path())
        .expect("failed to list temp home")
        .collect();
    assert!(entries.is_empty(), "aborted run must not mutate the filesystem");
}

#[cfg(target_os = "linux")]
#[test]
fn test_check_reports_unsupported_platform() {
    let ctx = TestContext::new();
    let output = ctx
        .installer_cmd()
        .arg("check")
        .output()
        .expect("failed to run installer check");

    assert_eq!(output.status.code(), Some(1));
}

#[cfg(target_os = "linux")]
#[test]
fn test_dry_run_also_respects_platform_gate() {
    let ctx = TestContext::new();
    let output = ctx
        .installer_cmd()
        .args(["install", "--dry-run"])
        .output()
        .expect("failed to run installer");

    assert_eq!(output.status.code(), Some(1));
}

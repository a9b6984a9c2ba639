//! Subprocess invocation behind a narrow capability trait.
//!
//! Every external tool the installer talks to (the Python launcher, pip,
//! ensurepip) is reached through [`CommandRunner`], so the pipeline can be
//! exercised in tests with a scripted fake instead of a live interpreter.
//! Invocations are synchronous and blocking with no timeout; a hung child
//! process hangs the installer.

use std::process::Command;
use thiserror::Error;

/// Captured result of one external invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status code, if the process terminated normally.
    pub status: Option<i32>,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the invocation exited with status zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// The most useful diagnostic stream: stderr if non-empty, else stdout.
    pub fn diagnostic(&self) -> &str {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim()
        } else {
            err
        }
    }
}

/// Errors that occur before a child process produces any output.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program is not present on `PATH`.
    #[error("'{0}' not found on PATH")]
    NotFound(String),

    /// The process could not be spawned for another reason.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying OS error.
        source: std::io::Error,
    },
}

/// Capability to run an external command and capture its output.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// The production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        tracing::debug!(program, ?args, "spawning");
        let output = match Command::new(program).args(args).output() {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CommandError::NotFound(program.to_string()));
            }
            Err(e) => {
                return Err(CommandError::Spawn {
                    program: program.to_string(),
                    source: e,
                });
            }
        };

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

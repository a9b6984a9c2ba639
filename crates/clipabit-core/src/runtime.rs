//! Python runtime and pip verification.
//!
//! The plugin runs inside Resolve's scripting environment, which uses the
//! system `python3`. We verify the interpreter exists and meets the version
//! floor, and that pip is available, self-healing pip once via `ensurepip`
//! if it is not.

use crate::process::{CommandError, CommandRunner};
use crate::reporter::Reporter;
use anyhow::{Result, bail};
use regex::Regex;
use std::path::PathBuf;

/// Launcher name used for every runtime invocation, on both platforms.
pub const PYTHON: &str = "python3";

/// Minimum `(major, minor)` the plugin supports.
pub const MIN_PYTHON: (u32, u32) = (3, 8);

/// Where to send the operator when the runtime is missing.
pub const PYTHON_DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

/// A Python version, compared as ordered numeric tuples (never as strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    /// Whether this version satisfies a `(major, minor)` floor.
    pub fn meets(self, floor: (u32, u32)) -> bool {
        (self.major, self.minor) >= floor
    }
}

impl std::fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Extract a version from interpreter output like `Python 3.9.7`.
pub fn parse_python_version(banner: &str) -> Option<PythonVersion> {
    let re = Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").ok()?;
    let caps = re.captures(banner)?;
    Some(PythonVersion {
        major: caps.get(1)?.as_str().parse().ok()?,
        minor: caps.get(2)?.as_str().parse().ok()?,
        patch: caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0),
    })
}

/// Outcome of a successful runtime probe.
#[derive(Debug, Clone)]
pub struct PythonInfo {
    /// The version the interpreter reported.
    pub version: PythonVersion,
    /// Where the launcher resolves on PATH, when determinable.
    pub path: Option<PathBuf>,
}

/// Verify `python3` is present and at least [`MIN_PYTHON`].
///
/// A missing interpreter, an unparseable banner, or a version below the
/// floor are all fatal for the pipeline.
pub fn check_python(runner: &dyn CommandRunner, reporter: &dyn Reporter) -> Result<PythonInfo> {
    reporter.info("Checking for Python installation...");

    let out = match runner.run(PYTHON, &["--version"]) {
        Ok(out) if out.success() => out,
        Ok(out) => {
            reporter.error("Python 3 is not installed or not in PATH.");
            reporter.info(&format!("Please install Python from: {PYTHON_DOWNLOAD_URL}"));
            bail!("'{PYTHON} --version' failed: {}", out.diagnostic());
        }
        Err(e) => {
            reporter.error("Python 3 is not installed or not in PATH.");
            reporter.info(&format!("Please install Python from: {PYTHON_DOWNLOAD_URL}"));
            return Err(e.into());
        }
    };

    // Some interpreters print the banner on stderr.
    let banner = if out.stdout.trim().is_empty() {
        out.stderr.trim().to_string()
    } else {
        out.stdout.trim().to_string()
    };
    reporter.success(&format!("Found {banner}"));

    let Some(version) = parse_python_version(&banner) else {
        bail!("Could not parse Python version from '{banner}'");
    };

    if !version.meets(MIN_PYTHON) {
        reporter.error(&format!(
            "Python {}.{} or higher is required.",
            MIN_PYTHON.0, MIN_PYTHON.1
        ));
        bail!("Python {version} is below the supported floor");
    }

    let path = which::which(PYTHON).ok();
    if let Some(p) = &path {
        reporter.success(&format!("Python executable: {}", p.display()));
    }

    Ok(PythonInfo { version, path })
}

/// Whether pip responds to a version probe. Read-only, never heals.
pub fn pip_present(runner: &dyn CommandRunner) -> bool {
    matches!(runner.run(PYTHON, &["-m", "pip", "--version"]), Ok(out) if out.success())
}

/// Verify pip is available, bootstrapping it once via `ensurepip` if not.
///
/// Bootstrap success is accepted as pip-present without a second probe;
/// bootstrap failure is fatal. Side effect: may install pip into the
/// runtime environment.
pub fn check_pip(runner: &dyn CommandRunner, reporter: &dyn Reporter) -> Result<()> {
    reporter.info("Checking for pip...");

    if let Ok(out) = runner.run(PYTHON, &["-m", "pip", "--version"]) {
        if out.success() {
            reporter.success(&format!("Found pip: {}", out.stdout.trim()));
            return Ok(());
        }
    }

    reporter.error("pip is not installed.");
    reporter.info("Installing pip...");
    tracing::info!("attempting ensurepip bootstrap");

    match runner.run(PYTHON, &["-m", "ensurepip", "--default-pip"]) {
        Ok(out) if out.success() => {
            reporter.success("pip installed successfully.");
            Ok(())
        }
        Ok(out) => {
            reporter.error("Failed to install pip.");
            bail!("ensurepip failed: {}", out.diagnostic());
        }
        Err(e) => {
            reporter.error("Failed to install pip.");
            Err(e.into())
        }
    }
}

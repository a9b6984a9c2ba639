//! Installation pipeline state machine.
//!
//! Models the install as an ordered sequence of gates, each side effect
//! conditional on every check before it succeeding:
//!
//! ```text
//! Start → PlatformOK → AppFound → RuntimeOK → PkgMgrOK → DepsResolved
//!       → DepsInstalled → FilesDeployed → {Verified | VerifiedWithWarnings}
//! ```
//!
//! Any gate failure transitions to `Aborted` (process exit code 1), except
//! the final verification gate: the files are already deployed at that
//! point, so its failure demotes to `SuccessWithWarnings` (exit code 0).

use std::fmt;
use std::path::PathBuf;

use crate::ops::{Context, InstallError};
use clipabit_core::paths::PLUGIN_NAME;
use clipabit_core::platform::{self, HostPlatform};
use clipabit_core::process::CommandRunner;
use clipabit_core::reporter::Reporter;
use clipabit_core::runtime::{self, PythonInfo};
use clipabit_core::{deploy, deps, manifest, verify};

/// The gate at which a run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Platform,
    HostApp,
    Runtime,
    PackageManager,
    Dependencies,
    Deployment,
    Verification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Platform => "platform check",
            Self::HostApp => "host application check",
            Self::Runtime => "runtime check",
            Self::PackageManager => "package manager check",
            Self::Dependencies => "dependency installation",
            Self::Deployment => "deployment",
            Self::Verification => "verification",
        };
        f.write_str(label)
    }
}

/// Terminal state of one run. Exists only for the process lifetime.
#[derive(Debug)]
pub enum Outcome {
    /// Everything succeeded; `target` is the installed plugin directory.
    Success { target: PathBuf },
    /// Files are deployed but verification flagged a problem.
    SuccessWithWarnings { target: PathBuf },
    /// A gate failed; nothing after it ran.
    Aborted { stage: Stage, error: InstallError },
}

impl Outcome {
    /// The process exit code this outcome maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Success { .. } | Self::SuccessWithWarnings { .. } => 0,
            Self::Aborted { .. } => 1,
        }
    }
}

/// Gate: the OS must be one of the two supported families.
pub fn platform_gate(
    reporter: &dyn Reporter,
    platform: HostPlatform,
) -> Result<(), InstallError> {
    if platform.is_supported() {
        reporter.success(&format!("Running on {platform}"));
        Ok(())
    } else {
        reporter.error(&format!("Unsupported platform: {platform}"));
        reporter.info("This installer supports macOS and Windows only.");
        Err(InstallError::Environment(format!(
            "unsupported platform: {platform}"
        )))
    }
}

/// Gate: DaVinci Resolve must be installed.
pub fn host_app_gate(
    reporter: &dyn Reporter,
    platform: HostPlatform,
) -> Result<PathBuf, InstallError> {
    platform::find_host_app(platform, reporter)
        .ok_or_else(|| InstallError::Environment("DaVinci Resolve not found".to_string()))
}

/// Gate: `python3` present and at least the supported floor.
pub fn python_gate(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
) -> Result<PythonInfo, InstallError> {
    runtime::check_python(runner, reporter).map_err(|e| InstallError::Environment(e.to_string()))
}

/// Gate: pip available, bootstrapping once if needed.
pub fn pip_gate(runner: &dyn CommandRunner, reporter: &dyn Reporter) -> Result<(), InstallError> {
    runtime::check_pip(runner, reporter).map_err(|e| InstallError::Tooling(e.to_string()))
}

/// Run the full pipeline on the detected platform.
pub fn run(ctx: &Context, dry_run: bool) -> Outcome {
    run_from(ctx, HostPlatform::current(), dry_run)
}

/// Run the full pipeline from an explicit platform identity.
pub fn run_from(ctx: &Context, platform: HostPlatform, dry_run: bool) -> Outcome {
    let reporter = ctx.reporter.as_ref();
    let runner = ctx.runner.as_ref();

    reporter.section("Checking Environment");

    if let Err(error) = platform_gate(reporter, platform) {
        return Outcome::Aborted {
            stage: Stage::Platform,
            error,
        };
    }

    if let Err(error) = host_app_gate(reporter, platform) {
        return Outcome::Aborted {
            stage: Stage::HostApp,
            error,
        };
    }

    if let Err(error) = python_gate(runner, reporter) {
        return Outcome::Aborted {
            stage: Stage::Runtime,
            error,
        };
    }

    if dry_run {
        // ensurepip mutates the runtime environment; a dry run only probes.
        if runtime::pip_present(runner) {
            reporter.success("pip is available.");
        } else {
            reporter.warning("pip is not installed; install would bootstrap it via ensurepip.");
        }
    } else if let Err(error) = pip_gate(runner, reporter) {
        return Outcome::Aborted {
            stage: Stage::PackageManager,
            error,
        };
    }

    reporter.section("Installing Dependencies");

    let resolution = manifest::resolve_dependencies(&ctx.plugin_source, reporter);
    let dependencies = resolution.dependencies().to_vec();

    if dry_run {
        for dep in &dependencies {
            reporter.info(&format!("Would install {dep}"));
        }
        return match deploy::resolve_target_directory(platform) {
            Ok(root) => {
                let target = root.join(PLUGIN_NAME);
                reporter.info(&format!("Would deploy plugin to: {}", target.display()));
                Outcome::Success { target }
            }
            Err(e) => Outcome::Aborted {
                stage: Stage::Deployment,
                error: InstallError::Deploy(e.to_string()),
            },
        };
    }

    if let Err(e) = deps::install_dependencies(runner, reporter, &dependencies) {
        return Outcome::Aborted {
            stage: Stage::Dependencies,
            error: InstallError::Dependency(e.to_string()),
        };
    }

    reporter.section("Deploying Plugin");

    if let Err(e) = deploy::deploy_plugin(platform, &ctx.plugin_source, reporter) {
        return Outcome::Aborted {
            stage: Stage::Deployment,
            error: InstallError::Deploy(e.to_string()),
        };
    }

    reporter.section("Verifying Installation");

    // Re-resolve rather than thread the path through: resolution is
    // deterministic, and this mirrors what Resolve itself will scan.
    let root = match deploy::resolve_target_directory(platform) {
        Ok(root) => root,
        Err(e) => {
            return Outcome::Aborted {
                stage: Stage::Deployment,
                error: InstallError::Deploy(e.to_string()),
            };
        }
    };

    let verification = verify::verify_installation(runner, reporter, &root, &dependencies);
    let target = root.join(PLUGIN_NAME);

    if verification.is_clean() {
        Outcome::Success { target }
    } else {
        Outcome::SuccessWithWarnings { target }
    }
}

//! The `check` command: environment probes with no side effects.
//!
//! Runs the read-only gates the installer would run, reports the resolved
//! dependency list and target directory, and exits 1 if any hard gate
//! fails. pip absence is only a warning here since a real install would
//! bootstrap it.

use std::process::ExitCode;
use std::sync::Arc;

use crate::ops::flow;
use crate::ui::Console;
use clipabit_core::paths::{self, PLUGIN_NAME};
use clipabit_core::platform::HostPlatform;
use clipabit_core::process::SystemRunner;
use clipabit_core::reporter::Reporter;
use clipabit_core::{deploy, manifest, runtime};

/// Probe the environment without mutating anything.
pub fn check(quiet: bool) -> ExitCode {
    let reporter: Arc<dyn Reporter> = Arc::new(Console::new(quiet));
    reporter.section("Environment Check");

    let runner = SystemRunner;
    let platform = HostPlatform::current();

    if flow::platform_gate(reporter.as_ref(), platform).is_err() {
        return ExitCode::FAILURE;
    }

    let mut failed = false;

    if flow::host_app_gate(reporter.as_ref(), platform).is_err() {
        failed = true;
    }

    if flow::python_gate(&runner, reporter.as_ref()).is_err() {
        failed = true;
    }

    if runtime::pip_present(&runner) {
        reporter.success("pip is available.");
    } else {
        reporter.warning("pip is not installed; install would bootstrap it via ensurepip.");
    }

    match paths::default_plugin_source() {
        Ok(source) => {
            let resolution = manifest::resolve_dependencies(&source, reporter.as_ref());
            for dep in resolution.dependencies() {
                reporter.info(&format!("Requires {dep}"));
            }
        }
        Err(e) => reporter.warning(&format!("{e}")),
    }

    match deploy::resolve_target_directory(platform) {
        Ok(root) => {
            reporter.info(&format!(
                "Plugin target: {}",
                root.join(PLUGIN_NAME).display()
            ));
        }
        Err(e) => {
            reporter.error(&format!("Could not resolve plugin directory: {e}"));
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        reporter.success("Environment looks good.");
        ExitCode::SUCCESS
    }
}

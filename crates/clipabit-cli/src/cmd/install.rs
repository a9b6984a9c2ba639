//! The `install` command: the full gated pipeline.

use std::process::ExitCode;
use std::sync::Arc;

use crate::ops::flow::{self, Outcome};
use crate::ops::Context;
use crate::ui::Console;
use clipabit_core::paths::{self, SUPPORT_URL};
use clipabit_core::process::SystemRunner;
use clipabit_core::reporter::Reporter;

/// Run the installation pipeline and map its outcome to an exit code.
pub fn install(dry_run: bool, quiet: bool) -> ExitCode {
    let reporter: Arc<dyn Reporter> = Arc::new(Console::new(quiet));
    reporter.section("ClipABit Plugin Installer");

    let plugin_source = match paths::default_plugin_source() {
        Ok(path) => path,
        Err(e) => {
            reporter.error(&format!("Installation aborted: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context::new(Arc::new(SystemRunner), reporter.clone(), plugin_source);
    let outcome = flow::run(&ctx, dry_run);
    tracing::debug!(?outcome, "pipeline finished");

    match &outcome {
        Outcome::Success { .. } if dry_run => {
            reporter.success("Dry run complete. No changes were made.");
        }
        Outcome::Success { .. } => print_completion(reporter.as_ref()),
        Outcome::SuccessWithWarnings { .. } => {
            reporter.warning("Installation completed with warnings.");
        }
        Outcome::Aborted { stage, error } => {
            reporter.error(&format!("Installation aborted at {stage}: {error}"));
        }
    }

    ExitCode::from(outcome.exit_code())
}

fn print_completion(reporter: &dyn Reporter) {
    reporter.section("Installation Complete!");
    reporter.success("ClipABit plugin has been installed successfully.");
    reporter.info("To use the plugin in DaVinci Resolve:");
    reporter.info("  1. Open DaVinci Resolve");
    reporter.info("  2. Go to the Fusion page");
    reporter.info("  3. Open the Script menu");
    reporter.info("  4. Select 'Utility' -> 'ClipABit' -> 'clipabit'");
    reporter.info(&format!("For support, visit: {SUPPORT_URL}"));
}

//! Sequential pip installation of resolved dependencies.

use crate::process::CommandRunner;
use crate::reporter::Reporter;
use crate::runtime::PYTHON;
use anyhow::{Result, bail};

/// Install each dependency in order via `pip install --upgrade`.
///
/// An empty list succeeds trivially without spawning anything. The first
/// non-zero exit aborts the remaining sequence; packages installed before
/// the failure stay installed (no rollback), and nothing is retried.
pub fn install_dependencies(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    deps: &[String],
) -> Result<()> {
    if deps.is_empty() {
        reporter.warning("No dependencies to install.");
        return Ok(());
    }

    for dep in deps {
        reporter.info(&format!("Installing {dep}..."));

        let out = runner
            .run(PYTHON, &["-m", "pip", "install", "--upgrade", dep])
            .map_err(|e| {
                reporter.error(&format!("Failed to install {dep}"));
                anyhow::Error::from(e)
            })?;

        if !out.success() {
            reporter.error(&format!("Failed to install {dep}"));
            reporter.error(&format!("Error: {}", out.diagnostic()));
            bail!("pip failed for '{dep}'");
        }

        reporter.success(&format!("Installed {dep}"));
    }

    reporter.success("All dependencies installed successfully.");
    Ok(())
}

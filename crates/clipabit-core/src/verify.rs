//! Post-deployment verification.
//!
//! Two checks, both demoted to warnings by the pipeline since the files are
//! already deployed: the entry point must exist under the resolved plugin
//! root, and every resolved dependency must be importable in the runtime's
//! default environment.

use crate::paths::{ENTRY_POINT, PLUGIN_NAME};
use crate::process::CommandRunner;
use crate::reporter::Reporter;
use crate::runtime::PYTHON;
use std::path::Path;

/// What verification found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// The deployed entry point exists.
    pub entry_present: bool,
    /// Every expected module imported cleanly (vacuously true for no deps).
    pub imports_ok: bool,
}

impl Verification {
    /// True when nothing warrants a warning.
    pub fn is_clean(self) -> bool {
        self.entry_present && self.imports_ok
    }
}

/// Derive the importable module name from a dependency spec string.
///
/// Strips the version constraint (`requests>=2.31.0` -> `requests`),
/// normalizes dashes to underscores, and maps distribution names whose
/// module name differs (`pyqt6` -> `PyQt6`).
pub fn import_name(dep: &str) -> String {
    let name: String = dep
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect();

    match name.to_ascii_lowercase().as_str() {
        "pyqt6" => "PyQt6".to_string(),
        _ => name.replace('-', "_"),
    }
}

/// Build the one-liner handed to `python3 -c`, or None for an empty list.
pub fn import_statement(deps: &[String]) -> Option<String> {
    if deps.is_empty() {
        return None;
    }
    let modules: Vec<String> = deps.iter().map(|d| import_name(d)).collect();
    Some(format!("import {}", modules.join(", ")))
}

/// Re-check the deployed entry point and probe dependency importability.
///
/// `plugin_root` must be the same directory the deployment resolved; the
/// resolution function is deterministic, so re-resolving yields it.
pub fn verify_installation(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    plugin_root: &Path,
    deps: &[String],
) -> Verification {
    reporter.info("Verifying installation...");

    let entry = plugin_root.join(PLUGIN_NAME).join(ENTRY_POINT);
    let entry_present = entry.exists();
    if entry_present {
        reporter.success("Plugin file verified.");
    } else {
        reporter.error("Plugin file not found after installation.");
    }

    let imports_ok = match import_statement(deps) {
        None => true,
        Some(statement) => {
            reporter.info("Checking dependencies...");
            match runner.run(PYTHON, &["-c", &statement]) {
                Ok(out) if out.success() => {
                    reporter.success("All dependencies are accessible.");
                    true
                }
                Ok(out) => {
                    tracing::debug!(statement = %statement, stderr = %out.stderr, "import probe failed");
                    reporter.error("Some dependencies are not accessible.");
                    false
                }
                Err(e) => {
                    tracing::debug!(error = %e, "import probe could not run");
                    reporter.error("Some dependencies are not accessible.");
                    false
                }
            }
        }
    };

    Verification {
        entry_present,
        imports_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{CommandError, CommandOutput};
    use crate::reporter::NullReporter;
    use std::fs;
    use tempfile::TempDir;

    struct ImportRunner {
        exit: i32,
    }

    impl CommandRunner for ImportRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
            assert_eq!(program, PYTHON);
            assert_eq!(args[0], "-c");
            Ok(CommandOutput {
                status: Some(self.exit),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    fn deployed_root(tmp: &TempDir) -> std::path::PathBuf {
        let root = tmp.path().join("Utility");
        fs::create_dir_all(root.join(PLUGIN_NAME)).unwrap();
        fs::write(root.join(PLUGIN_NAME).join(ENTRY_POINT), "").unwrap();
        root
    }

    #[test]
    fn test_import_name_strips_constraint() {
        assert_eq!(import_name("requests>=2.31.0"), "requests");
        assert_eq!(import_name("watchdog~=3.0"), "watchdog");
        assert_eq!(import_name("requests"), "requests");
    }

    #[test]
    fn test_import_name_aliases_and_normalizes() {
        assert_eq!(import_name("pyqt6>=6.10.0"), "PyQt6");
        assert_eq!(import_name("PyQt6"), "PyQt6");
        assert_eq!(import_name("typing-extensions>=4.0"), "typing_extensions");
    }

    #[test]
    fn test_import_statement() {
        let deps = vec!["pyqt6>=6.10.0".to_string(), "requests>=2.31.0".to_string()];
        assert_eq!(
            import_statement(&deps).unwrap(),
            "import PyQt6, requests"
        );
        assert_eq!(import_statement(&[]), None);
    }

    #[test]
    fn test_clean_verification() {
        let tmp = TempDir::new().unwrap();
        let root = deployed_root(&tmp);
        let deps = vec!["requests>=2.31.0".to_string()];
        let v = verify_installation(&ImportRunner { exit: 0 }, &NullReporter, &root, &deps);
        assert!(v.is_clean());
    }

    #[test]
    fn test_missing_entry_is_flagged() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Utility");
        fs::create_dir_all(&root).unwrap();
        let v = verify_installation(&ImportRunner { exit: 0 }, &NullReporter, &root, &[]);
        assert!(!v.entry_present);
        assert!(v.imports_ok);
    }

    #[test]
    fn test_unimportable_dependency_is_flagged() {
        let tmp = TempDir::new().unwrap();
        let root = deployed_root(&tmp);
        let deps = vec!["requests>=2.31.0".to_string()];
        let v = verify_installation(&ImportRunner { exit: 1 }, &NullReporter, &root, &deps);
        assert!(v.entry_present);
        assert!(!v.imports_ok);
        assert!(!v.is_clean());
    }

    // No declared dependencies: the import probe is skipped entirely.
    #[test]
    fn test_no_deps_skips_import_probe() {
        struct PanicRunner;
        impl CommandRunner for PanicRunner {
            fn run(&self, _: &str, _: &[&str]) -> Result<CommandOutput, CommandError> {
                panic!("no subprocess expected");
            }
        }

        let tmp = TempDir::new().unwrap();
        let root = deployed_root(&tmp);
        let v = verify_installation(&PanicRunner, &NullReporter, &root, &[]);
        assert!(v.is_clean());
    }
}

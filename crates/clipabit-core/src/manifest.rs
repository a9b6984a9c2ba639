//! Dependency resolution from the plugin's `pyproject.toml`.
//!
//! The manifest lives inside the plugin payload and declares the packages
//! the plugin needs at runtime under `[project] dependencies`. Resolution is
//! an ordered chain of fallible strategies, first success wins:
//!
//! 1. manifest present and parseable, non-empty list -> [`Resolution::Declared`]
//! 2. manifest present and parseable, empty list     -> [`Resolution::Empty`]
//! 3. manifest missing or unparseable                -> [`Resolution::Fallback`]
//!
//! Case 2 is deliberate: an explicit empty declaration is trusted, an
//! unreadable one is not. Resolution is never fatal.

use crate::reporter::Reporter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Packages assumed when the manifest cannot be read.
pub const FALLBACK_DEPENDENCIES: [&str; 3] =
    ["pyqt6>=6.10.0", "requests>=2.31.0", "watchdog>=3.0.0"];

/// Manifest filename looked up inside the plugin payload.
pub const MANIFEST_NAME: &str = "pyproject.toml";

/// The slice of `pyproject.toml` this installer cares about.
#[derive(Debug, Deserialize)]
struct PyProject {
    #[serde(default)]
    project: ProjectTable,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    dependencies: Vec<String>,
}

/// How the dependency list was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Parsed from the manifest, non-empty.
    Declared(Vec<String>),
    /// Manifest missing or unreadable; the hardcoded list applies.
    Fallback(Vec<String>),
    /// Manifest explicitly declares no dependencies. Trusted as-is.
    Empty,
}

impl Resolution {
    /// The dependency strings to install, in declaration order.
    pub fn dependencies(&self) -> &[String] {
        match self {
            Self::Declared(deps) | Self::Fallback(deps) => deps,
            Self::Empty => &[],
        }
    }
}

fn fallback_list() -> Vec<String> {
    FALLBACK_DEPENDENCIES.iter().map(ToString::to_string).collect()
}

/// Path of the manifest for a given plugin payload directory.
pub fn manifest_path(plugin_source: &Path) -> PathBuf {
    plugin_source.join(MANIFEST_NAME)
}

/// Resolve the dependency list for the plugin payload at `plugin_source`.
pub fn resolve_dependencies(plugin_source: &Path, reporter: &dyn Reporter) -> Resolution {
    let path = manifest_path(plugin_source);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => {
            reporter.warning(&format!("{MANIFEST_NAME} not found at {}", path.display()));
            tracing::debug!(path = %path.display(), "manifest missing, using fallback list");
            return Resolution::Fallback(fallback_list());
        }
    };

    let parsed: PyProject = match toml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            reporter.error(&format!("Failed to read {MANIFEST_NAME}: {e}"));
            return Resolution::Fallback(fallback_list());
        }
    };

    let deps = parsed.project.dependencies;
    if deps.is_empty() {
        reporter.warning(&format!("No dependencies found in {MANIFEST_NAME}"));
        Resolution::Empty
    } else {
        reporter.success(&format!("Loaded {} dependencies from {MANIFEST_NAME}", deps.len()));
        Resolution::Declared(deps)
    }
}

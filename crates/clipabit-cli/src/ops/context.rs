//! Shared installation context.
//!
//! This module defines the `Context` struct, which groups common state references
//! used throughout the installation process to reduce argument fatigue.

use clipabit_core::process::CommandRunner;
use clipabit_core::reporter::Reporter;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Groups common state used during installation operations.
#[derive(Clone)]
pub struct Context {
    pub runner: Arc<dyn CommandRunner>,
    pub reporter: Arc<dyn Reporter>,
    /// The plugin payload directory shipped next to the installer.
    pub plugin_source: PathBuf,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("plugin_source", &self.plugin_source)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<dyn Reporter>,
        plugin_source: PathBuf,
    ) -> Self {
        Self {
            runner,
            reporter,
            plugin_source,
        }
    }
}

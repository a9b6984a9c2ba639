//! Plugin identity constants and installer-relative paths.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory name the plugin is installed under inside the Fusion scripts root.
pub const PLUGIN_NAME: &str = "ClipABit";

/// Entry-point file Resolve executes from the Script menu.
pub const ENTRY_POINT: &str = "clipabit.py";

/// Plugin payload location relative to the installer binary.
pub const PLUGIN_SOURCE_REL: &str = "frontend/plugin";

/// Support page printed after a successful installation.
pub const SUPPORT_URL: &str = "https://github.com/yourusername/clipabit";

/// Resolve the plugin payload directory shipped next to the installer.
///
/// The payload travels with the installer binary; its absence is a
/// packaging error, reported by the deployment gate rather than here.
pub fn default_plugin_source() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not locate the installer executable")?;
    let dir = exe
        .parent()
        .context("Installer executable has no parent directory")?;
    Ok(dir.join(PLUGIN_SOURCE_REL))
}

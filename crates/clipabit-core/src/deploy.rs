//! Plugin deployment into the Resolve Fusion scripts directory.
//!
//! Resolve scans two script roots per platform, one private to the current
//! account and one machine-wide. Exactly one is selected per run: the user
//! scope, unless it is absent while the system scope exists. Once selected,
//! the `ClipABit` subdirectory there is owned by this run — any prior
//! contents are replaced wholesale, never merged.

use crate::paths::{ENTRY_POINT, PLUGIN_NAME};
use crate::platform::HostPlatform;
use crate::reporter::Reporter;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// The user-scope / system-scope plugin root pair for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDirs {
    /// Root private to the current account.
    pub user: PathBuf,
    /// Machine-wide root.
    pub system: PathBuf,
}

/// The candidate plugin roots for `platform`.
///
/// Fails on `Unsupported` (the pipeline gates on platform long before
/// deployment) or when the home directory / Windows profile env vars
/// cannot be resolved.
pub fn plugin_dirs(platform: HostPlatform) -> Result<PluginDirs> {
    const RESOLVE_MAC: &str = "Blackmagic Design/DaVinci Resolve/Fusion/Scripts/Utility";

    match platform {
        HostPlatform::MacOs => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            Ok(PluginDirs {
                user: home.join("Library/Application Support").join(RESOLVE_MAC),
                system: Path::new("/Library/Application Support").join(RESOLVE_MAC),
            })
        }
        HostPlatform::Windows => {
            let appdata = std::env::var_os("APPDATA").context("APPDATA is not set")?;
            let programdata = std::env::var_os("PROGRAMDATA").context("PROGRAMDATA is not set")?;
            Ok(PluginDirs {
                user: PathBuf::from(appdata)
                    .join("Blackmagic Design\\DaVinci Resolve\\Support\\Fusion\\Scripts\\Utility"),
                system: PathBuf::from(programdata)
                    .join("Blackmagic Design\\DaVinci Resolve\\Fusion\\Scripts\\Utility"),
            })
        }
        HostPlatform::Unsupported => bail!("No plugin directory on an unsupported platform"),
    }
}

/// Select one root from the candidate pair.
///
/// User scope wins unless it is absent while the system scope exists.
/// Pure over filesystem existence: deterministic and idempotent for
/// unchanged state.
pub fn choose_plugin_root(dirs: &PluginDirs) -> PathBuf {
    if dirs.user.exists() || !dirs.system.exists() {
        dirs.user.clone()
    } else {
        dirs.system.clone()
    }
}

/// Resolve the plugin root for `platform`. Creates nothing.
pub fn resolve_target_directory(platform: HostPlatform) -> Result<PathBuf> {
    Ok(choose_plugin_root(&plugin_dirs(platform)?))
}

/// Copy the plugin payload from `source` into `plugin_root`.
///
/// Creates the root (idempotent), deletes any existing installation at
/// `<root>/ClipABit` entirely, copies the full source tree, and marks the
/// entry point executable on Unix (best effort, unchecked). Returns the
/// installed plugin directory.
pub fn deploy_tree(source: &Path, plugin_root: &Path, reporter: &dyn Reporter) -> Result<PathBuf> {
    if !source.exists() {
        bail!("Plugin source directory not found: {}", source.display());
    }

    let target = plugin_root.join(PLUGIN_NAME);
    reporter.info(&format!("Source: {}", source.display()));
    reporter.info(&format!("Target: {}", target.display()));

    fs::create_dir_all(plugin_root)
        .with_context(|| format!("Failed to create plugin directory: {}", plugin_root.display()))?;
    reporter.success(&format!("Plugin directory ready: {}", plugin_root.display()));

    if target.exists() {
        reporter.warning("Existing ClipABit installation found. Removing...");
        fs::remove_dir_all(&target)
            .with_context(|| format!("Failed to remove existing installation: {}", target.display()))?;
        reporter.success("Removed existing installation.");
    }

    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.content_only = true;
    fs_extra::dir::copy(source, &target, &options)
        .with_context(|| format!("Failed to copy plugin files to {}", target.display()))?;

    let copied = walkdir::WalkDir::new(&target)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .count();
    reporter.success(&format!(
        "Plugin files copied to: {} ({copied} files)",
        target.display()
    ));

    set_entry_executable(&target, reporter);

    Ok(target)
}

/// Resolve the target root and deploy `source` there.
pub fn deploy_plugin(
    platform: HostPlatform,
    source: &Path,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    reporter.info("Installing ClipABit plugin...");
    let plugin_root = resolve_target_directory(platform)?;
    deploy_tree(source, &plugin_root, reporter)
}

#[cfg(unix)]
fn set_entry_executable(target: &Path, reporter: &dyn Reporter) {
    use std::os::unix::fs::PermissionsExt;

    let entry = target.join(ENTRY_POINT);
    if entry.exists() {
        // Best effort: Resolve only needs the read bit, the exec bit is a convenience.
        let _ = fs::set_permissions(&entry, fs::Permissions::from_mode(0o755));
        reporter.success("Plugin file permissions set.");
    }
}

#[cfg(not(unix))]
fn set_entry_executable(_target: &Path, _reporter: &dyn Reporter) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use tempfile::TempDir;

    fn dirs_in(root: &Path) -> PluginDirs {
        PluginDirs {
            user: root.join("user/Scripts/Utility"),
            system: root.join("system/Scripts/Utility"),
        }
    }

    #[test]
    fn test_choose_user_scope_when_present() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        fs::create_dir_all(&dirs.user).unwrap();
        fs::create_dir_all(&dirs.system).unwrap();
        assert_eq!(choose_plugin_root(&dirs), dirs.user);
    }

    #[test]
    fn test_choose_user_scope_when_neither_exists() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        assert_eq!(choose_plugin_root(&dirs), dirs.user);
    }

    #[test]
    fn test_choose_system_scope_only_when_user_absent() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        fs::create_dir_all(&dirs.system).unwrap();
        assert_eq!(choose_plugin_root(&dirs), dirs.system);
    }

    #[test]
    fn test_choice_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        fs::create_dir_all(&dirs.system).unwrap();
        assert_eq!(choose_plugin_root(&dirs), choose_plugin_root(&dirs));
    }

    fn make_source(root: &Path) -> PathBuf {
        let source = root.join("frontend/plugin");
        fs::create_dir_all(source.join("ui")).unwrap();
        fs::write(source.join(ENTRY_POINT), "#!/usr/bin/env python3\n").unwrap();
        fs::write(source.join("ui/panel.py"), "# panel\n").unwrap();
        fs::write(source.join("pyproject.toml"), "[project]\nname = \"clipabit\"\n").unwrap();
        source
    }

    #[test]
    fn test_deploy_copies_full_tree() {
        let tmp = TempDir::new().unwrap();
        let source = make_source(tmp.path());
        let root = tmp.path().join("Scripts/Utility");

        let installed = deploy_tree(&source, &root, &NullReporter).unwrap();

        assert_eq!(installed, root.join(PLUGIN_NAME));
        assert!(installed.join(ENTRY_POINT).exists());
        assert!(installed.join("ui/panel.py").exists());
        assert!(installed.join("pyproject.toml").exists());
    }

    // Prior installation is replaced, not merged: no residual files survive.
    #[test]
    fn test_deploy_replaces_prior_installation() {
        let tmp = TempDir::new().unwrap();
        let source = make_source(tmp.path());
        let root = tmp.path().join("Scripts/Utility");

        let stale = root.join(PLUGIN_NAME).join("stale");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("leftover.py"), "# old\n").unwrap();

        let installed = deploy_tree(&source, &root, &NullReporter).unwrap();

        assert!(!installed.join("stale").exists());
        let mut files: Vec<String> = walkdir::WalkDir::new(&installed)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&installed)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        files.sort();
        assert_eq!(files, vec!["clipabit.py", "pyproject.toml", "ui/panel.py"]);
    }

    #[test]
    fn test_deploy_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Scripts/Utility");
        let missing = tmp.path().join("nope");
        assert!(deploy_tree(&missing, &root, &NullReporter).is_err());
        assert!(!root.exists(), "failed deploy must not create the root");
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_point_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let source = make_source(tmp.path());
        let root = tmp.path().join("Scripts/Utility");

        let installed = deploy_tree(&source, &root, &NullReporter).unwrap();
        let mode = fs::metadata(installed.join(ENTRY_POINT)).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
    }
}

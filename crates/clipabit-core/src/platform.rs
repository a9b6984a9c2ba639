//! Host platform identity and DaVinci Resolve detection.
//!
//! Resolve is an external black box: we never launch or control it, we only
//! probe a fixed list of well-known install locations (standard and Studio
//! editions) to confirm it is present.

use crate::reporter::Reporter;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where to send the operator when Resolve is missing.
pub const RESOLVE_DOWNLOAD_URL: &str =
    "https://www.blackmagicdesign.com/products/davinciresolve/";

/// The operating system the installer is running on.
///
/// Determined once at startup and immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// macOS (Darwin).
    MacOs,
    /// Windows.
    Windows,
    /// Anything else. Fails the first pipeline gate.
    Unsupported,
}

impl HostPlatform {
    /// Detect the platform of the running process.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Unsupported,
        }
    }

    /// Whether this platform can host the plugin at all.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Unsupported => std::env::consts::OS,
        };
        f.write_str(label)
    }
}

/// Well-known Resolve install locations, standard edition first.
pub fn host_app_candidates(platform: HostPlatform) -> &'static [&'static str] {
    match platform {
        HostPlatform::MacOs => &[
            "/Applications/DaVinci Resolve/DaVinci Resolve.app",
            "/Applications/DaVinci Resolve Studio/DaVinci Resolve Studio.app",
        ],
        HostPlatform::Windows => &[
            "C:\\Program Files\\Blackmagic Design\\DaVinci Resolve\\Resolve.exe",
            "C:\\Program Files\\Blackmagic Design\\DaVinci Resolve Studio\\Resolve.exe",
        ],
        HostPlatform::Unsupported => &[],
    }
}

/// Probe the fixed candidate list for an existing Resolve installation.
///
/// Returns the first path that exists. Read-only: no side effects.
pub fn find_host_app(platform: HostPlatform, reporter: &dyn Reporter) -> Option<PathBuf> {
    reporter.info("Checking for DaVinci Resolve installation...");

    for candidate in host_app_candidates(platform) {
        let path = Path::new(candidate);
        if path.exists() {
            reporter.success(&format!("Found DaVinci Resolve at: {}", path.display()));
            return Some(path.to_path_buf());
        }
        tracing::debug!(candidate, "not present");
    }

    reporter.error("DaVinci Resolve not found");
    reporter.info("Please install DaVinci Resolve from:");
    reporter.info(RESOLVE_DOWNLOAD_URL);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;

    #[test]
    fn test_from_os_name() {
        assert_eq!(HostPlatform::from_os_name("macos"), HostPlatform::MacOs);
        assert_eq!(HostPlatform::from_os_name("windows"), HostPlatform::Windows);
        assert_eq!(HostPlatform::from_os_name("linux"), HostPlatform::Unsupported);
        assert_eq!(HostPlatform::from_os_name("freebsd"), HostPlatform::Unsupported);
    }

    #[test]
    fn test_supported_platforms() {
        assert!(HostPlatform::MacOs.is_supported());
        assert!(HostPlatform::Windows.is_supported());
        assert!(!HostPlatform::Unsupported.is_supported());
    }

    #[test]
    fn test_candidates_cover_both_editions() {
        for platform in [HostPlatform::MacOs, HostPlatform::Windows] {
            let candidates = host_app_candidates(platform);
            assert_eq!(candidates.len(), 2);
            assert!(candidates[1].contains("Studio"));
        }
        assert!(host_app_candidates(HostPlatform::Unsupported).is_empty());
    }

    #[test]
    fn test_find_host_app_unsupported_is_none() {
        assert_eq!(find_host_app(HostPlatform::Unsupported, &NullReporter), None);
    }
}

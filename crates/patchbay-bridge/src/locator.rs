//! Locating the adb executable
//!
//! Resolution order: explicit override from config, the patchbay-managed
//! platform-tools cache, PATH, then the usual Android SDK environment
//! variables.

use std::path::{Path, PathBuf};

use patchbay_core::prelude::*;
use patchbay_core::SpecialFolders;

const ADB_BINARY: &str = if cfg!(windows) { "adb.exe" } else { "adb" };

/// Find a usable adb executable.
///
/// `override_path` comes from `config.toml` and wins unconditionally when it
/// points at an existing file.
pub fn locate_adb(override_path: Option<&Path>, folders: &SpecialFolders) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            debug!("Using adb from config override: {}", path.display());
            return Ok(path.to_path_buf());
        }
        warn!(
            "Configured adb_path {} does not exist, falling back to discovery",
            path.display()
        );
    }

    let cached = folders.tools_dir().join("platform-tools").join(ADB_BINARY);
    if cached.is_file() {
        debug!("Using cached platform-tools adb: {}", cached.display());
        return Ok(cached);
    }

    if let Ok(path) = which::which(ADB_BINARY) {
        debug!("Using adb from PATH: {}", path.display());
        return Ok(path);
    }

    for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
        if let Ok(sdk) = std::env::var(var) {
            let candidate = Path::new(&sdk).join("platform-tools").join(ADB_BINARY);
            if candidate.is_file() {
                debug!("Using adb from {}: {}", var, candidate.display());
                return Ok(candidate);
            }
        }
    }

    Err(Error::AdbNotFound)
}

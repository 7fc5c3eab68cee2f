//! Special-folder resolution
//!
//! Everything patchbay writes on disk lives under one data-local root:
//! logs, the downloaded platform-tools cache, and diagnostic dumps.

use std::path::{Path, PathBuf};

use crate::error::Result;

const APP_DIR: &str = "patchbay";

/// Resolved on-disk locations for the application's persistent state.
///
/// Created once at startup; all directories exist after [`SpecialFolders::resolve`].
#[derive(Debug, Clone)]
pub struct SpecialFolders {
    root: PathBuf,
}

impl SpecialFolders {
    /// Resolve the folder layout under the platform data-local directory
    /// and create any missing directories.
    pub fn resolve() -> Result<Self> {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join(APP_DIR))
    }

    /// Use an explicit root instead of the platform default. Tests use this
    /// with a temp dir.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let folders = Self { root: root.into() };
        std::fs::create_dir_all(folders.logs_dir())?;
        std::fs::create_dir_all(folders.tools_dir())?;
        std::fs::create_dir_all(folders.dumps_dir())?;
        Ok(folders)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where rolling application logs and captured device logs go.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Cache of downloaded platform-tools. Cleared and rebuilt by quick fix.
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join("tools")
    }

    /// Parent directory for diagnostic dump bundles.
    pub fn dumps_dir(&self) -> PathBuf {
        self.root.join("dumps")
    }

    /// Config file location.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Destination file for a streaming device-log session.
    pub fn device_log_file(&self) -> PathBuf {
        self.logs_dir().join("adb.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let folders = SpecialFolders::at(tmp.path().join("patchbay")).unwrap();

        assert!(folders.logs_dir().is_dir());
        assert!(folders.tools_dir().is_dir());
        assert!(folders.dumps_dir().is_dir());
    }

    #[test]
    fn test_device_log_file_is_under_logs_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let folders = SpecialFolders::at(tmp.path()).unwrap();

        assert!(folders.device_log_file().starts_with(folders.logs_dir()));
        assert_eq!(
            folders.device_log_file().file_name().unwrap(),
            "adb.log"
        );
    }
}

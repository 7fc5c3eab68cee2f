//! Settings parser for config.toml in the patchbay data directory

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use patchbay_core::prelude::*;
use patchbay_core::SpecialFolders;

/// User configuration. Everything is optional; a missing file means
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Package id of the tracked app (e.g. `com.example.app`). Required for
    /// uninstall and the package part of diagnostic dumps.
    pub app_id: Option<String>,

    /// Explicit path to the adb executable, overriding discovery.
    pub adb_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the data directory. A missing file yields
    /// defaults; an unreadable or malformed file is an error the caller
    /// should surface, not silently replace.
    pub fn load(folders: &SpecialFolders) -> Result<Self> {
        Self::load_from(&folders.config_file())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&contents).map_err(|e| Error::config_invalid(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_parses_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "app_id = \"com.example.app\"\nadb_path = \"/opt/platform-tools/adb\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.app_id.as_deref(), Some("com.example.app"));
        assert_eq!(
            settings.adb_path.as_deref(),
            Some(Path::new("/opt/platform-tools/adb"))
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "app_id = [not toml").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }
}

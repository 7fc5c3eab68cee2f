//! One-shot adb command execution
//!
//! Long-lived streaming use of the bridge (logcat capture) lives in
//! [`crate::logcat`]; this module covers commands that run to completion and
//! return their output.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use patchbay_core::prelude::*;

/// Handle for invoking adb against the tracked app.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    adb_path: PathBuf,
    package_id: Option<String>,
}

impl AdbBridge {
    pub fn new(adb_path: PathBuf, package_id: Option<String>) -> Self {
        Self {
            adb_path,
            package_id,
        }
    }

    pub fn adb_path(&self) -> &std::path::Path {
        &self.adb_path
    }

    /// The package id of the tracked app, if one is configured.
    pub fn package_id(&self) -> Result<&str> {
        self.package_id
            .as_deref()
            .ok_or_else(|| Error::config("no tracked app configured; set `app_id` in config.toml"))
    }

    /// Run adb with the given arguments, returning stdout on success.
    ///
    /// A non-zero exit is a bridge fault carrying the captured stderr.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running adb {}", args.join(" "));

        let output = Command::new(&self.adb_path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::AdbNotFound
                } else {
                    Error::process_spawn(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::bridge(format!(
                "adb {} failed (exit {:?}): {}",
                args.first().copied().unwrap_or(""),
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Uninstall the tracked app from the connected device.
    pub async fn uninstall_current_app(&self) -> Result<()> {
        let package = self.package_id()?.to_string();
        info!("Uninstalling {}", package);

        let stdout = self.run(&["uninstall", &package]).await?;
        // `adb uninstall` reports some failures on stdout with exit code 0.
        if stdout.contains("Failure") {
            return Err(Error::bridge(format!(
                "uninstall of {package} failed: {}",
                stdout.trim()
            )));
        }
        Ok(())
    }

    /// Device properties, for diagnostic dumps.
    pub async fn getprop(&self) -> Result<String> {
        self.run(&["shell", "getprop"]).await
    }

    /// Package manager state for the tracked app, for diagnostic dumps.
    pub async fn dumpsys_package(&self) -> Result<String> {
        let package = self.package_id()?.to_string();
        self.run(&["shell", "dumpsys", "package", &package]).await
    }

    /// Stop the adb server. Used by quick fix before the platform-tools
    /// cache is cleared.
    pub async fn kill_server(&self) -> Result<()> {
        self.run(&["kill-server"]).await.map(|_| ())
    }

    /// Start the adb server back up.
    pub async fn start_server(&self) -> Result<()> {
        self.run(&["start-server"]).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_required() {
        let bridge = AdbBridge::new(PathBuf::from("adb"), None);
        assert!(matches!(bridge.package_id(), Err(Error::Config { .. })));

        let bridge = AdbBridge::new(PathBuf::from("adb"), Some("com.example.app".into()));
        assert_eq!(bridge.package_id().unwrap(), "com.example.app");
    }

    #[tokio::test]
    async fn test_missing_executable_maps_to_adb_not_found() {
        let bridge = AdbBridge::new(
            PathBuf::from("/nonexistent/path/to/adb-binary"),
            Some("com.example.app".into()),
        );
        let err = bridge.run(&["version"]).await.unwrap_err();
        assert!(matches!(err, Error::AdbNotFound));
    }
}

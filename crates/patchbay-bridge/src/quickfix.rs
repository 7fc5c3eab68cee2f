//! Platform-tools repair ("quick fix")
//!
//! Stops the adb server, wipes the patchbay-managed platform-tools cache so
//! a fresh copy is fetched on next use, then brings the server back up.
//! While this runs the device channel is unusable, which is why the
//! coordinating operation declares exclusive channel use.

use patchbay_core::prelude::*;
use patchbay_core::SpecialFolders;

use crate::adb::AdbBridge;

pub async fn run_quick_fix(adb: &AdbBridge, folders: &SpecialFolders) -> Result<()> {
    info!("Quick fix: restarting adb and clearing the platform-tools cache");

    // The server may already be dead; that is not a failure.
    if let Err(e) = adb.kill_server().await {
        warn!("kill-server failed, continuing: {}", e);
    }

    let tools_dir = folders.tools_dir();
    if tools_dir.exists() {
        tokio::fs::remove_dir_all(&tools_dir)
            .await
            .map_err(|e| Error::bridge(format!("could not clear tools cache: {e}")))?;
    }
    tokio::fs::create_dir_all(&tools_dir).await?;
    debug!("Cleared tools cache at {}", tools_dir.display());

    adb.start_server().await?;
    info!("Quick fix complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_quick_fix_clears_tools_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let folders = SpecialFolders::at(tmp.path()).unwrap();

        let stale = folders.tools_dir().join("platform-tools");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("adb"), b"stale").unwrap();

        // `true` accepts and ignores the kill-server/start-server args.
        let adb = AdbBridge::new(PathBuf::from("true"), None);
        run_quick_fix(&adb, &folders).await.unwrap();

        assert!(folders.tools_dir().is_dir());
        assert!(!stale.exists());
    }
}

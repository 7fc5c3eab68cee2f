//! Diagnostic dump assembly
//!
//! Collects what support usually asks for into one timestamped directory:
//! device properties, the package manager's view of the tracked app, and a
//! copy of the current patchbay log. Returns the dump's location so the host
//! can reveal it.

use std::path::PathBuf;

use patchbay_core::prelude::*;
use patchbay_core::{logging, SpecialFolders};

use crate::adb::AdbBridge;

#[derive(Debug, Clone)]
pub struct InfoDumper {
    adb: AdbBridge,
    folders: SpecialFolders,
}

impl InfoDumper {
    pub fn new(adb: AdbBridge, folders: SpecialFolders) -> Self {
        Self { adb, folders }
    }

    /// Create a diagnostic dump in the default location and return its path.
    pub async fn create_info_dump(&self) -> Result<PathBuf> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let dump_dir = self.folders.dumps_dir().join(format!("dump-{stamp}"));
        tokio::fs::create_dir_all(&dump_dir)
            .await
            .map_err(|e| Error::dump(format!("could not create {}: {e}", dump_dir.display())))?;

        info!("Creating diagnostic dump in {}", dump_dir.display());

        match self.adb.getprop().await {
            Ok(props) => tokio::fs::write(dump_dir.join("device-props.txt"), props).await?,
            Err(e) => {
                // Device info is the heart of the dump; without it the
                // bundle is useless.
                return Err(Error::dump(format!("could not read device properties: {e}")));
            }
        }

        match self.adb.dumpsys_package().await {
            Ok(dump) => tokio::fs::write(dump_dir.join("package.txt"), dump).await?,
            Err(e) => warn!("Skipping package dump: {}", e),
        }

        let log_file = logging::current_log_file(&self.folders);
        if log_file.is_file() {
            if let Err(e) = tokio::fs::copy(&log_file, dump_dir.join("patchbay.log")).await {
                warn!("Could not copy application log into dump: {}", e);
            }
        }

        info!("Diagnostic dump written to {}", dump_dir.display());
        Ok(dump_dir)
    }
}

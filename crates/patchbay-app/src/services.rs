//! Collaborator service traits
//!
//! The orchestrator consumes the device bridge through these traits so that
//! scenario tests can substitute recording fakes. The real implementations
//! delegate to `patchbay-bridge`.

use std::path::{Path, PathBuf};

use patchbay_core::prelude::*;
use patchbay_core::SpecialFolders;
use patchbay_bridge::{quickfix, AdbBridge, InfoDumper, LogcatCapture, LogcatService};

/// Long-running device operations invoked under the operation lock.
#[trait_variant::make(PatchServices: Send)]
pub trait LocalPatchServices {
    /// Uninstall the tracked app from the device.
    async fn uninstall_current_app(&self) -> Result<()>;

    /// Repair/refresh required tooling. Implies exclusive device-channel
    /// use while it runs.
    async fn quick_fix(&self) -> Result<()>;

    /// Produce a diagnostic bundle and return its location.
    async fn create_info_dump(&self) -> Result<PathBuf>;
}

/// Streaming device-log capture.
#[trait_variant::make(LogCapture: Send)]
pub trait LocalLogCapture {
    /// Opaque handle to a running capture.
    type Handle: Send;

    /// Begin streaming device log lines to `destination`.
    async fn start_logging(&self, destination: &Path) -> Result<Self::Handle>;

    /// Request termination of a running capture. Fire-and-forget; the
    /// session-ended event confirms the transition.
    fn stop_logging(&self, handle: &mut Self::Handle);
}

/// Host OS integration, best effort.
pub trait HostShell {
    /// Open the file browser at `path`.
    fn reveal_location(&self, path: &Path);
}

// ─────────────────────────────────────────────────────────────────
// Production implementations
// ─────────────────────────────────────────────────────────────────

/// The real device bridge behind [`PatchServices`].
#[derive(Debug, Clone)]
pub struct DeviceBridgeServices {
    adb: AdbBridge,
    dumper: InfoDumper,
    folders: SpecialFolders,
}

impl DeviceBridgeServices {
    pub fn new(adb: AdbBridge, folders: SpecialFolders) -> Self {
        let dumper = InfoDumper::new(adb.clone(), folders.clone());
        Self {
            adb,
            dumper,
            folders,
        }
    }
}

impl PatchServices for DeviceBridgeServices {
    async fn uninstall_current_app(&self) -> Result<()> {
        self.adb.uninstall_current_app().await
    }

    async fn quick_fix(&self) -> Result<()> {
        quickfix::run_quick_fix(&self.adb, &self.folders).await
    }

    async fn create_info_dump(&self) -> Result<PathBuf> {
        self.dumper.create_info_dump().await
    }
}

impl LogCapture for LogcatService {
    type Handle = LogcatCapture;

    async fn start_logging(&self, destination: &Path) -> Result<LogcatCapture> {
        self.start(destination).await
    }

    fn stop_logging(&self, handle: &mut LogcatCapture) {
        handle.stop();
    }
}

/// [`HostShell`] backed by the OS file browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl HostShell for SystemShell {
    fn reveal_location(&self, path: &Path) {
        patchbay_bridge::reveal_location(path);
    }
}

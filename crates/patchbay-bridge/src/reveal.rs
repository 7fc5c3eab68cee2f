//! Opening the host file browser
//!
//! Best effort, fire-and-forget: a failure to open a folder is logged and
//! otherwise ignored, it never fails the operation that produced the folder.

use std::path::Path;
use std::process::{Command, Stdio};

use patchbay_core::prelude::*;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Open the OS file browser at `path`, detached from our process.
pub fn reveal_location(path: &Path) {
    debug!("Revealing {}", path.display());

    let result = Command::new(OPENER)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match result {
        Ok(_child) => {}
        Err(e) => warn!("Could not open file browser at {}: {}", path.display(), e),
    }
}

//! # patchbay-bridge - Device Bridge Collaborators
//!
//! Everything that talks to the connected device or the host OS on behalf of
//! the coordination core: locating and invoking `adb`, streaming logcat
//! capture, platform-tools repair, diagnostic dump assembly, and opening the
//! host file browser.
//!
//! The coordination core in `patchbay-app` consumes these types through its
//! service traits; nothing here knows about operation locks or notification
//! channels.

pub mod adb;
pub mod dumper;
pub mod events;
pub mod locator;
pub mod logcat;
pub mod quickfix;
pub mod reveal;

pub use adb::AdbBridge;
pub use dumper::InfoDumper;
pub use events::BridgeEvent;
pub use locator::locate_adb;
pub use logcat::{LogcatCapture, LogcatService};
pub use reveal::reveal_location;

//! Events emitted by bridge background tasks

/// Asynchronous signals from bridge-owned processes to the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeEvent {
    /// The streaming logcat session terminated, whether because we asked it
    /// to or because the process exited on its own. Carries no payload; the
    /// coordination core reconciles its state the same way in both cases.
    LogSessionEnded,
}

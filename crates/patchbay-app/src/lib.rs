//! patchbay-app - Operation coordination and state
//!
//! This crate implements the state and orchestration that sits between
//! user-triggered actions and the device bridge: the operation lock, the
//! device-log session state machine, the notification channel to the host
//! view, and the orchestrator that runs each action through a uniform
//! confirm / lock / invoke / report / release protocol.

pub mod config;
pub mod locker;
pub mod log_session;
pub mod notify;
pub mod orchestrator;
pub mod services;

// Re-export primary types
pub use config::Settings;
pub use locker::{LockState, OperationGuard, OperationLocker};
pub use log_session::{LogSessionController, LABEL_START_LOG, LABEL_STOP_LOG};
pub use notify::{Notification, NotificationSender, PROP_LOG_TOGGLE_LABEL};
pub use orchestrator::{ActionOrchestrator, ActionOutcome};
pub use services::{DeviceBridgeServices, HostShell, LogCapture, PatchServices, SystemShell};

//! Action orchestration
//!
//! Every user-triggered action runs through the same protocol: confirm if
//! destructive, acquire the operation lock if required, invoke exactly one
//! collaborator, report the result, release the lock. Faults never escape
//! this boundary; each action yields exactly one [`ActionOutcome`].

use std::path::PathBuf;

use patchbay_core::prelude::*;
use patchbay_core::Error;

use crate::locker::OperationLocker;
use crate::log_session::LogSessionController;
use crate::notify::{NotificationSender, PROP_LOG_TOGGLE_LABEL};
use crate::services::{HostShell, LogCapture, PatchServices};

/// Terminal result of one orchestrated action.
#[derive(Debug)]
pub enum ActionOutcome {
    Success,
    /// The user declined the confirmation prompt. Not an error; no dialog.
    UserCancelled,
    Failed(Error),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ActionOutcome::UserCancelled)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }
}

/// Coordinates user-triggered device actions against the bridge.
///
/// Owns the operation lock and the log-session state for the process
/// lifetime; collaborators are injected at construction and only invoked
/// through the action methods below.
pub struct ActionOrchestrator<S, L, H>
where
    S: PatchServices,
    L: LogCapture,
    H: HostShell,
{
    services: S,
    log_capture: L,
    host: H,
    locker: OperationLocker,
    log_session: LogSessionController<L::Handle>,
    notifier: NotificationSender,
    device_log_file: PathBuf,
}

impl<S, L, H> ActionOrchestrator<S, L, H>
where
    S: PatchServices,
    L: LogCapture,
    H: HostShell,
{
    pub fn new(
        services: S,
        log_capture: L,
        host: H,
        notifier: NotificationSender,
        device_log_file: PathBuf,
    ) -> Self {
        Self {
            services,
            log_capture,
            host,
            locker: OperationLocker::new(),
            log_session: LogSessionController::new(),
            notifier,
            device_log_file,
        }
    }

    pub fn locker(&self) -> &OperationLocker {
        &self.locker
    }

    pub fn log_session_active(&self) -> bool {
        self.log_session.is_active()
    }

    pub fn log_toggle_label(&self) -> &'static str {
        self.log_session.toggle_label()
    }

    pub fn subscribe_log_toggle_label(&self) -> tokio::sync::watch::Receiver<&'static str> {
        self.log_session.subscribe_label()
    }

    /// Uninstall the tracked app, after confirmation. Destructive: declines
    /// short-circuit before the lock is acquired or any collaborator runs.
    pub async fn uninstall_app(&mut self) -> ActionOutcome {
        let confirmed = self
            .notifier
            .confirm(
                "Are you sure?",
                "Uninstalling the app closes patchbay, since it needs the app \
                 installed. Reinstall the app and reopen patchbay to patch again.",
                "Uninstall app",
            )
            .await;
        if !confirmed {
            debug!("Uninstall declined");
            return ActionOutcome::UserCancelled;
        }

        let _operation = self.locker.start_operation(false);
        info!("Uninstalling app");
        match self.services.uninstall_current_app().await {
            Ok(()) => ActionOutcome::Success,
            Err(err) => self.report_failure(
                "Failed to uninstall app",
                "Uninstalling the app failed due to an unhandled error",
                err,
            ),
        }
    }

    /// Repair platform tooling. The device channel is unavailable for the
    /// duration, so the lock declares exclusive channel use.
    pub async fn quick_fix(&mut self) -> ActionOutcome {
        let _operation = self.locker.start_operation(true);
        info!("Running quick fix");
        match self.services.quick_fix().await {
            Ok(()) => {
                info!("Quick fix done");
                ActionOutcome::Success
            }
            Err(err) => self.report_failure(
                "Failed to clear cache",
                "Running the quick fix failed due to an unhandled error",
                err,
            ),
        }
    }

    /// Start or stop the streaming device log. Independent of the main
    /// operation lock, except that a start is rejected while the running
    /// operation holds exclusive use of the device channel.
    pub async fn toggle_device_log(&mut self) -> ActionOutcome {
        if let Some(handle) = self.log_session.active_mut() {
            // Stop is a request only; the state flips when the session-ended
            // signal confirms termination.
            self.log_capture.stop_logging(handle);
            return ActionOutcome::Success;
        }

        if self.locker.excludes_device_channel() {
            warn!("Device log start rejected: operation holds the device channel");
            return ActionOutcome::Failed(Error::DeviceChannelBusy);
        }

        info!("Starting device log");
        let destination = self.device_log_file.clone();
        match self.log_capture.start_logging(&destination).await {
            Ok(handle) => {
                self.log_session.activate(handle);
                self.notifier.property_changed(PROP_LOG_TOGGLE_LABEL);
                ActionOutcome::Success
            }
            Err(err) => self.report_failure(
                "Failed to start device log",
                "The device log capture could not be started",
                err,
            ),
        }
    }

    /// Create a diagnostic dump and reveal its containing location.
    pub async fn create_dump(&mut self) -> ActionOutcome {
        let _operation = self.locker.start_operation(false);
        info!("Creating diagnostic dump");
        match self.services.create_info_dump().await {
            Ok(dump_location) => {
                // Open the dump's directory for convenience.
                if let Some(dump_folder) = dump_location.parent() {
                    self.host.reveal_location(dump_folder);
                }
                ActionOutcome::Success
            }
            Err(err) => self.report_failure(
                "Failed to create dump",
                "Creating the dump failed due to an unhandled error",
                err,
            ),
        }
    }

    /// Open the folder holding patchbay's own log files. Fire-and-forget:
    /// no confirmation, no lock, no collaborator that can fault.
    pub async fn open_logs_folder(&self) -> ActionOutcome {
        if let Some(logs_folder) = self.device_log_file.parent() {
            self.host.reveal_location(logs_folder);
        }
        ActionOutcome::Success
    }

    /// Switch the tracked app: hand control back to the host's app-selection
    /// view.
    pub async fn change_app(&mut self) -> ActionOutcome {
        self.notifier.view_transition(false);
        ActionOutcome::Success
    }

    /// Inbound session-ended signal from the bridge: the log capture
    /// terminated, requested or spontaneous. Idempotent.
    pub fn log_session_ended(&mut self) {
        if self.log_session.session_ended() {
            info!("Device log session ended");
        }
        self.notifier.property_changed(PROP_LOG_TOGGLE_LABEL);
    }

    fn report_failure(&self, title: &str, text: &str, err: Error) -> ActionOutcome {
        error!("{}: {:?}", title, err);
        self.notifier.error_dialog(title, text, &err);
        ActionOutcome::Failed(err)
    }
}

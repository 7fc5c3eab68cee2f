//! Notification channel to the host view
//!
//! One-directional signals from the orchestrator to whatever renders them:
//! property changes, error dialogs, and view transitions are fire-and-
//! observe; `Confirm` is the single request/response round trip, answered
//! over a oneshot. No ownership crosses back except that boolean.

use tokio::sync::{mpsc, oneshot};

use patchbay_core::Error;

/// Property name for the derived log-toggle label.
pub const PROP_LOG_TOGGLE_LABEL: &str = "log_toggle_label";

/// A signal to the host/presentation layer.
#[derive(Debug)]
pub enum Notification {
    /// A derived display value changed; the host should re-read it.
    PropertyChanged(&'static str),

    /// Show an error dialog naming the failed action, with the underlying
    /// cause attached for diagnostics.
    ErrorDialog {
        title: String,
        text: String,
        cause: String,
    },

    /// Ask the user to confirm a destructive action. Answer over `reply`;
    /// a dropped sender counts as declined.
    Confirm {
        title: String,
        text: String,
        ok_label: String,
        reply: oneshot::Sender<bool>,
    },

    /// Ask the host to switch the displayed view.
    ViewTransition { first_launch: bool },
}

/// Sending half of the notification channel, held by the orchestrator.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: mpsc::UnboundedSender<Notification>,
}

/// Create the notification channel. The receiver goes to the host's event
/// loop.
pub fn channel() -> (NotificationSender, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NotificationSender { tx }, rx)
}

impl NotificationSender {
    pub fn property_changed(&self, name: &'static str) {
        let _ = self.tx.send(Notification::PropertyChanged(name));
    }

    pub fn error_dialog(&self, title: impl Into<String>, text: impl Into<String>, cause: &Error) {
        let _ = self.tx.send(Notification::ErrorDialog {
            title: title.into(),
            text: text.into(),
            cause: format!("{cause:?}"),
        });
    }

    pub fn view_transition(&self, first_launch: bool) {
        let _ = self.tx.send(Notification::ViewTransition { first_launch });
    }

    /// Request confirmation and suspend until the host answers. A closed
    /// channel or dropped reply sender both read as "declined".
    pub async fn confirm(
        &self,
        title: impl Into<String>,
        text: impl Into<String>,
        ok_label: impl Into<String>,
    ) -> bool {
        let (reply, answer) = oneshot::channel();
        if self
            .tx
            .send(Notification::Confirm {
                title: title.into(),
                text: text.into(),
                ok_label: ok_label.into(),
                reply,
            })
            .is_err()
        {
            return false;
        }
        answer.await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_round_trip() {
        let (sender, mut rx) = channel();

        let responder = tokio::spawn(async move {
            match rx.recv().await {
                Some(Notification::Confirm { reply, .. }) => {
                    reply.send(true).unwrap();
                }
                other => panic!("expected Confirm, got {other:?}"),
            }
        });

        assert!(sender.confirm("Are you sure?", "Really?", "Yes").await);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_reply_reads_as_declined() {
        let (sender, mut rx) = channel();

        let responder = tokio::spawn(async move {
            // Host goes away without answering.
            let _ = rx.recv().await;
        });

        assert!(!sender.confirm("Are you sure?", "Really?", "Yes").await);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_confirm_on_closed_channel_is_declined() {
        let (sender, rx) = channel();
        drop(rx);
        assert!(!sender.confirm("t", "x", "ok").await);
    }

    #[test]
    fn test_fire_and_observe_ignores_closed_channel() {
        let (sender, rx) = channel();
        drop(rx);
        // Must not panic.
        sender.property_changed(PROP_LOG_TOGGLE_LABEL);
        sender.view_transition(false);
    }
}

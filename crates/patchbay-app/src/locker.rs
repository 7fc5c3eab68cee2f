//! The operation lock
//!
//! Mutual exclusion between long-running device operations. The lock is a
//! safety net, not a queue: the UI only offers one action at a time, so an
//! overlapping acquisition is a programming defect and panics instead of
//! blocking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

/// Observable lock state. `Busy` carries whether the running operation
/// needs exclusive use of the device channel (e.g. a quick fix reinstalls
/// platform-tools, so no log capture may start meanwhile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Idle,
    Busy {
        excludes_device_channel: bool,
    },
}

impl LockState {
    pub fn is_busy(&self) -> bool {
        matches!(self, LockState::Busy { .. })
    }
}

/// Mutual-exclusion gate over "a device operation is in progress".
///
/// Created once at startup and owned by the orchestrator for the process
/// lifetime. Hosts subscribe via [`subscribe`](Self::subscribe) to
/// re-evaluate enablement of anything gated on the lock.
#[derive(Debug)]
pub struct OperationLocker {
    state: watch::Sender<LockState>,
    started: Arc<AtomicU64>,
    finished: Arc<AtomicU64>,
}

impl OperationLocker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LockState::Idle);
        Self {
            state,
            started: Arc::new(AtomicU64::new(0)),
            finished: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Begin an operation. Panics if one is already in progress: the
    /// orchestrator never issues overlapping starts, so hitting this is a
    /// defect, not a condition to recover from.
    ///
    /// The returned guard releases the lock when dropped, on every exit
    /// path including panics.
    #[must_use = "dropping the guard releases the lock immediately"]
    pub fn start_operation(&self, excludes_device_channel: bool) -> OperationGuard {
        let previous = self.state.send_replace(LockState::Busy {
            excludes_device_channel,
        });
        if previous.is_busy() {
            panic!("start_operation while another operation is in progress");
        }
        self.started.fetch_add(1, Ordering::SeqCst);
        OperationGuard {
            state: self.state.clone(),
            finished: Arc::clone(&self.finished),
        }
    }

    pub fn current(&self) -> LockState {
        *self.state.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.current().is_busy()
    }

    /// True while the running operation forbids concurrent device-channel
    /// use.
    pub fn excludes_device_channel(&self) -> bool {
        matches!(
            self.current(),
            LockState::Busy {
                excludes_device_channel: true
            }
        )
    }

    /// Change subscription for derived display values gated on the lock.
    pub fn subscribe(&self) -> watch::Receiver<LockState> {
        self.state.subscribe()
    }

    pub fn operations_started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn operations_finished(&self) -> u64 {
        self.finished.load(Ordering::SeqCst)
    }
}

impl Default for OperationLocker {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped-acquisition guard for one operation. Releasing is the guard's
/// `Drop`, so release runs exactly once per start, on success, cancellation
/// and fault alike.
#[derive(Debug)]
pub struct OperationGuard {
    state: watch::Sender<LockState>,
    finished: Arc<AtomicU64>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.state.send_replace(LockState::Idle);
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_released_when_guard_drops() {
        let locker = OperationLocker::new();
        assert!(!locker.is_busy());

        {
            let _guard = locker.start_operation(false);
            assert!(locker.is_busy());
            assert!(!locker.excludes_device_channel());
        }

        assert!(!locker.is_busy());
        assert_eq!(locker.operations_started(), 1);
        assert_eq!(locker.operations_finished(), 1);
    }

    #[test]
    fn test_excludes_device_channel_visible_while_busy() {
        let locker = OperationLocker::new();
        let _guard = locker.start_operation(true);
        assert!(locker.excludes_device_channel());
    }

    #[test]
    #[should_panic(expected = "another operation is in progress")]
    fn test_overlapping_start_panics() {
        let locker = OperationLocker::new();
        let _first = locker.start_operation(false);
        let _second = locker.start_operation(false);
    }

    #[test]
    fn test_release_runs_on_panic_path() {
        let locker = OperationLocker::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = locker.start_operation(false);
            panic!("operation blew up");
        }));
        assert!(result.is_err());
        assert!(!locker.is_busy());
        assert_eq!(locker.operations_started(), locker.operations_finished());
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let locker = OperationLocker::new();
        let mut rx = locker.subscribe();
        assert_eq!(*rx.borrow(), LockState::Idle);

        let guard = locker.start_operation(true);
        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow(),
            LockState::Busy {
                excludes_device_channel: true
            }
        );

        drop(guard);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), LockState::Idle);
    }
}

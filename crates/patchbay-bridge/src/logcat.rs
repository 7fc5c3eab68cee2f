//! Streaming device-log capture
//!
//! Spawns `adb logcat` with piped stdout and streams every line to a
//! destination file. The child process is owned by a dedicated wait task so
//! the real exit is always observed: whether the capture is stopped through
//! [`LogcatCapture::stop`] or the process dies on its own, exactly one
//! [`BridgeEvent::LogSessionEnded`] is emitted.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

use patchbay_core::prelude::*;

use crate::events::BridgeEvent;

/// Factory for logcat capture sessions.
#[derive(Debug, Clone)]
pub struct LogcatService {
    adb_path: PathBuf,
    event_tx: mpsc::Sender<BridgeEvent>,
}

impl LogcatService {
    pub fn new(adb_path: PathBuf, event_tx: mpsc::Sender<BridgeEvent>) -> Self {
        Self { adb_path, event_tx }
    }

    /// Start streaming the device log to `destination`.
    ///
    /// Fails fast if the destination file cannot be created or the process
    /// cannot be spawned; after a successful return the session is live and
    /// its termination will be reported via the event channel.
    pub async fn start(&self, destination: &Path) -> Result<LogcatCapture> {
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = tokio::fs::File::create(destination).await?;

        info!("Starting device log capture to {}", destination.display());

        let mut child = Command::new(&self.adb_path)
            .args(["logcat", "-v", "time"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::AdbNotFound
                } else {
                    Error::process_spawn(e.to_string())
                }
            })?;

        let pid = child.id();
        debug!("logcat process started with PID: {:?}", pid);

        let stdout = child.stdout.take().expect("stdout was configured");
        tokio::spawn(Self::line_writer(stdout, file));

        let exited = Arc::new(AtomicBool::new(false));
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            self.event_tx.clone(),
            Arc::clone(&exited),
        ));

        Ok(LogcatCapture {
            kill_tx: Some(kill_tx),
            exited,
            pid,
        })
    }

    /// Background task: copies logcat stdout lines into the capture file.
    async fn line_writer(stdout: tokio::process::ChildStdout, mut file: tokio::fs::File) {
        let mut reader = BufReader::new(stdout).lines();

        while let Ok(Some(line)) = reader.next_line().await {
            if file.write_all(line.as_bytes()).await.is_err() {
                error!("Failed to write device log line, stopping writer");
                break;
            }
            if file.write_all(b"\n").await.is_err() {
                break;
            }
        }

        let _ = file.flush().await;
        debug!("device log writer finished");
    }

    /// Background task: owns `child`, waits for it to exit, emits
    /// `BridgeEvent::LogSessionEnded`.
    ///
    /// Two ways the task can end:
    /// 1. The logcat process exits naturally (device unplugged, adb killed).
    /// 2. `kill_rx` fires because the user stopped the capture.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        event_tx: mpsc::Sender<BridgeEvent>,
        exited: Arc<AtomicBool>,
    ) {
        tokio::select! {
            result = child.wait() => {
                match result {
                    Ok(status) => info!("logcat exited with status: {:?}", status),
                    Err(e) => error!("Error waiting for logcat process: {}", e),
                }
            }
            _ = kill_rx => {
                debug!("Stop requested, killing logcat process");
                if let Err(e) = child.kill().await {
                    error!("Failed to kill logcat process: {}", e);
                }
                let _ = child.wait().await;
            }
        }

        exited.store(true, Ordering::Release);
        let _ = event_tx.send(BridgeEvent::LogSessionEnded).await;
    }
}

/// A running logcat capture session.
///
/// Dropping the handle without calling [`stop`](Self::stop) also terminates
/// the capture (the kill channel closes and the wait task kills the child).
#[derive(Debug)]
pub struct LogcatCapture {
    /// One-shot sender that tells the wait task to kill the process.
    /// Consumed on first use.
    kill_tx: Option<oneshot::Sender<()>>,
    /// Set by the wait task once the child has exited.
    exited: Arc<AtomicBool>,
    pid: Option<u32>,
}

impl LogcatCapture {
    /// Request termination of the capture. Fire-and-forget: the state
    /// transition is confirmed by the `LogSessionEnded` event, not by this
    /// call returning.
    pub fn stop(&mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            debug!("Requesting logcat stop (pid {:?})", self.pid);
            let _ = kill_tx.send(());
        }
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_with_bad_adb_fails_fast() {
        let tmp = tempfile::tempdir().unwrap();
        let (event_tx, _event_rx) = mpsc::channel(8);
        let service = LogcatService::new(
            PathBuf::from("/nonexistent/path/to/adb-binary"),
            event_tx,
        );

        let err = service.start(&tmp.path().join("adb.log")).await.unwrap_err();
        assert!(matches!(err, Error::AdbNotFound));
    }

    #[tokio::test]
    async fn test_capture_emits_session_ended_on_exit() {
        // Use a short-lived command in place of adb; the wait task must
        // still report exactly one LogSessionEnded.
        let tmp = tempfile::tempdir().unwrap();
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let service = LogcatService::new(PathBuf::from("true"), event_tx);

        let capture = service.start(&tmp.path().join("adb.log")).await.unwrap();

        let event = event_rx.recv().await.unwrap();
        assert_eq!(event, BridgeEvent::LogSessionEnded);
        assert!(capture.has_exited());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let service = LogcatService::new(PathBuf::from("true"), event_tx);

        let mut capture = service.start(&tmp.path().join("adb.log")).await.unwrap();
        capture.stop();
        capture.stop();

        // Exactly one termination event regardless of how often stop ran.
        assert_eq!(event_rx.recv().await.unwrap(), BridgeEvent::LogSessionEnded);
        assert!(event_rx.try_recv().is_err());
    }
}

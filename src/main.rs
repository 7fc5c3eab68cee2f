//! patchbay - desktop companion that patches and manages a mobile app over ADB
//!
//! This binary wires the device bridge into the coordination core and drives
//! one action per invocation. The notification stream is rendered by a small
//! terminal host; a GUI shell would consume the same stream.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use patchbay_app::{
    config::Settings, notify, ActionOrchestrator, ActionOutcome, DeviceBridgeServices, HostShell,
    LogCapture, PatchServices, SystemShell,
};
use patchbay_bridge::{locate_adb, AdbBridge, BridgeEvent, LogcatService};
use patchbay_core::SpecialFolders;

mod host;

/// Desktop companion that patches and manages a mobile app over ADB
#[derive(Parser, Debug)]
#[command(name = "patchbay")]
#[command(about = "Patch and manage a mobile app installation over ADB", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Uninstall the tracked app from the connected device
    Uninstall,
    /// Restart adb and refresh the platform-tools cache
    Quickfix,
    /// Create a diagnostic dump and open its folder
    Dump,
    /// Capture the device log to a file until interrupted
    Log,
    /// Open the folder containing patchbay's logs
    OpenLogs,
    /// Switch which app patchbay tracks
    ChangeApp,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let folders = SpecialFolders::resolve()?;
    patchbay_core::logging::init(&folders)?;

    let settings = Settings::load(&folders)?;
    let adb_path = locate_adb(settings.adb_path.as_deref(), &folders)?;
    info!("Using adb at {}", adb_path.display());

    let (bridge_tx, bridge_rx) = mpsc::channel::<BridgeEvent>(32);
    let adb = AdbBridge::new(adb_path.clone(), settings.app_id.clone());
    let services = DeviceBridgeServices::new(adb, folders.clone());
    let log_capture = LogcatService::new(adb_path, bridge_tx);

    let (notifier, notify_rx) = notify::channel();
    let mut orchestrator = ActionOrchestrator::new(
        services,
        log_capture,
        SystemShell,
        notifier,
        folders.device_log_file(),
    );
    let host_task = tokio::spawn(host::run(notify_rx));

    let outcome = match args.command {
        Command::Uninstall => orchestrator.uninstall_app().await,
        Command::Quickfix => orchestrator.quick_fix().await,
        Command::Dump => orchestrator.create_dump().await,
        Command::OpenLogs => orchestrator.open_logs_folder().await,
        Command::ChangeApp => orchestrator.change_app().await,
        Command::Log => {
            run_log_session(&mut orchestrator, bridge_rx, folders.device_log_file()).await
        }
    };

    // Closing the notification channel lets the host task drain and exit.
    drop(orchestrator);
    host_task.await?;

    match outcome {
        ActionOutcome::Success => Ok(()),
        ActionOutcome::UserCancelled => {
            println!("Cancelled.");
            Ok(())
        }
        // The dialog has already been shown; just report the failure status.
        ActionOutcome::Failed(_) => std::process::exit(1),
    }
}

/// Drive one interactive log-capture session: start the capture, wait for
/// either Ctrl+C (request stop, then await confirmation) or spontaneous
/// termination, and reconcile the session state in both cases.
async fn run_log_session<S, L, H>(
    orchestrator: &mut ActionOrchestrator<S, L, H>,
    mut bridge_rx: mpsc::Receiver<BridgeEvent>,
    destination: PathBuf,
) -> ActionOutcome
where
    S: PatchServices,
    L: LogCapture,
    H: HostShell,
{
    let outcome = orchestrator.toggle_device_log().await;
    if !outcome.is_success() {
        return outcome;
    }
    println!(
        "Capturing device log to {} (press Ctrl+C to stop)",
        destination.display()
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            let _ = orchestrator.toggle_device_log().await;
            if let Some(BridgeEvent::LogSessionEnded) = bridge_rx.recv().await {
                orchestrator.log_session_ended();
            }
            println!("Device log capture stopped.");
        }
        event = bridge_rx.recv() => {
            if let Some(BridgeEvent::LogSessionEnded) = event {
                orchestrator.log_session_ended();
            }
            eprintln!("Device log session ended on its own.");
        }
    }

    ActionOutcome::Success
}

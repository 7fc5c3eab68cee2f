//! Logging configuration using tracing

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;
use crate::folders::SpecialFolders;

/// Initialize the logging subsystem
///
/// Logs are written to the `logs/` directory under the patchbay data root.
/// Log level is controlled by the `PATCHBAY_LOG` environment variable.
///
/// # Examples
/// ```bash
/// PATCHBAY_LOG=debug patchbay dump
/// PATCHBAY_LOG=trace patchbay log
/// ```
pub fn init(folders: &SpecialFolders) -> Result<()> {
    let log_dir = folders.logs_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "patchbay.log");

    // Default to info, allow override via PATCHBAY_LOG
    let env_filter = EnvFilter::try_from_env("PATCHBAY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("patchbay=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("patchbay starting, log directory: {}", log_dir.display());

    Ok(())
}

/// Path of the current day's application log file, for inclusion in
/// diagnostic dumps.
pub fn current_log_file(folders: &SpecialFolders) -> std::path::PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d");
    folders.logs_dir().join(format!("patchbay.log.{stamp}"))
}

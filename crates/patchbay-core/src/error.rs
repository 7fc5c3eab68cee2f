//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Device Bridge Errors
    // ─────────────────────────────────────────────────────────────
    #[error("adb executable not found. Install platform-tools or set `adb_path` in config.toml.")]
    AdbNotFound,

    #[error("Device bridge error: {message}")]
    Bridge { message: String },

    #[error("Failed to spawn bridge process: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Bridge process exited unexpectedly with code: {code:?}")]
    ProcessExit { code: Option<i32> },

    // ─────────────────────────────────────────────────────────────
    // Coordination Errors
    // ─────────────────────────────────────────────────────────────
    #[error("The device channel is reserved by the operation in progress")]
    DeviceChannelBusy,

    // ─────────────────────────────────────────────────────────────
    // Diagnostics Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to assemble diagnostic dump: {message}")]
    Dump { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration file {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }

    pub fn process_spawn(reason: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            reason: reason.into(),
        }
    }

    pub fn dump(message: impl Into<String>) -> Self {
        Self::Dump {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (reported to the user, app keeps running)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Bridge { .. }
                | Error::ProcessExit { .. }
                | Error::DeviceChannelBusy
                | Error::Dump { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::AdbNotFound | Error::ProcessSpawn { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::bridge("device offline");
        assert_eq!(err.to_string(), "Device bridge error: device offline");

        let err = Error::AdbNotFound;
        assert!(err.to_string().contains("adb executable not found"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::AdbNotFound.is_fatal());
        assert!(Error::process_spawn("adb missing").is_fatal());
        assert!(!Error::bridge("device offline").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::bridge("device offline").is_recoverable());
        assert!(Error::DeviceChannelBusy.is_recoverable());
        assert!(Error::dump("no space left").is_recoverable());
        assert!(!Error::AdbNotFound.is_recoverable());
    }

    #[test]
    fn test_config_invalid_carries_path() {
        let err = Error::config_invalid("/data/config.toml", "expected a string");
        assert!(err.to_string().contains("/data/config.toml"));
        assert!(err.to_string().contains("expected a string"));
    }
}

//! # patchbay-core - Core Domain Types
//!
//! Foundation crate for patchbay. Provides the error taxonomy, logging
//! setup, and special-folder resolution shared by every other crate.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (chrono, thiserror, tracing, dirs).

pub mod error;
pub mod folders;
pub mod logging;

/// Prelude for common imports used throughout all patchbay crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use folders::SpecialFolders;

//! Error types for vlist.
//!
//! The list engine itself does not fail for well-formed input: selection,
//! scrolling, binding and listener management are total. Errors exist only at
//! the edges, where the demo shell reads configuration and record files and
//! drives a terminal.
//!
//! # Error Hierarchy
//!
//! - [`ListError`] - Top-level error for the demo binary
//!   - [`RecordsError`] - Record file reading/parsing failures
//!   - [`ConfigError`] - Configuration file failures
//!   - [`LoggingError`] - Tracing subscriber initialisation failures
//!   - `std::io::Error` - Terminal failures

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error encompassing all failure modes of the demo binary.
#[derive(Debug, Error)]
pub enum ListError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Records could not be loaded.
    #[error("Failed to load records: {0}")]
    Records(#[from] RecordsError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors reading a JSON record file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordsError {
    /// The file could not be read.
    #[error("Failed to read records at {path}: {reason}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// The file is not a JSON array of records.
    #[error("Invalid records in {path}: {reason}")]
    Parse {
        /// Path with invalid content.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

//! Error types and handling for Feedsweep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Failure policy: `NotFound`-style errors are usually non-fatal and handled
//! at the call site (treated as a no-op or reported), IO failures are fatal
//! for the affected step only, and `BackupCreationFailed` plus invalid-input
//! errors are fatal for the whole invocation.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Feedsweep operations
#[derive(Error, Diagnostic, Debug)]
pub enum FeedsweepError {
    // Catalog errors
    #[error("Source '{id}' not found")]
    #[diagnostic(
        code(feedsweep::catalog::source_not_found),
        help("Run 'feedsweep list' to see the sources in the catalog")
    )]
    SourceNotFound { id: String },

    #[error("Bundle '{id}' not found")]
    #[diagnostic(code(feedsweep::bundles::not_found))]
    BundleNotFound { id: String },

    #[error("No sources selected")]
    #[diagnostic(
        code(feedsweep::remove::empty_selection),
        help("Pass one or more source ids, or pick at least one in the menu")
    )]
    EmptySelection,

    // Backup errors
    #[error("Backup '{id}' not found")]
    #[diagnostic(
        code(feedsweep::backup::not_found),
        help("Run 'feedsweep backups list' to see available backups")
    )]
    BackupNotFound { id: String },

    #[error("Failed to create backup: {reason}")]
    #[diagnostic(
        code(feedsweep::backup::creation_failed),
        help("No destructive step was performed. Check free disk space and permissions on the backups directory")
    )]
    BackupCreationFailed { reason: String },

    #[error("Backup '{id}' is corrupted: artifact '{path}' does not match its recorded hash")]
    #[diagnostic(
        code(feedsweep::backup::corrupted),
        help("The backup was modified after creation and cannot be restored safely")
    )]
    BackupCorrupted { id: String, path: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(feedsweep::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(feedsweep::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Could not determine a configuration directory")]
    #[diagnostic(
        code(feedsweep::config::no_home),
        help("Set FEEDSWEEP_CONFIG_DIR or pass --config-dir")
    )]
    NoConfigDir,

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(feedsweep::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(feedsweep::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to delete: {path}")]
    #[diagnostic(code(feedsweep::fs::delete_failed))]
    DeleteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(feedsweep::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for FeedsweepError {
    fn from(err: std::io::Error) -> Self {
        FeedsweepError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FeedsweepError {
    fn from(err: serde_yaml::Error) -> Self {
        FeedsweepError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FeedsweepError {
    fn from(err: serde_json::Error) -> Self {
        FeedsweepError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for FeedsweepError {
    fn from(err: inquire::InquireError) -> Self {
        FeedsweepError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FeedsweepError>;

//! Error types for housekeeping operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a housekeeping run
#[derive(Error, Debug)]
pub enum HousekeeperError {
    /// Target directory is missing; raised before anything is listed
    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A single file could not be deleted.
    ///
    /// Reported to the operator and logged, never returned from a run.
    #[error("Error deleting {}: {}", .path.display(), .cause)]
    DeletionFailed {
        /// File that could not be removed
        path: PathBuf,
        /// Underlying filesystem error
        cause: String,
    },

    /// Listing the tree or reading a modification time failed
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Operator input could not be read
    #[error("Prompt error: {0}")]
    Prompt(String),
}

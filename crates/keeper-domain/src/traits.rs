//! Trait definitions for external interactions
//!
//! These traits define the boundaries between housekeeping logic and the
//! outside world. Implementations backed by the real filesystem and console
//! live in `keeper-janitor`; tests supply in-memory ones.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem operations needed by a housekeeping run
pub trait FileSystem {
    /// Error type for filesystem operations
    type Error;

    /// Check whether `path` is an existing directory
    fn exists(&self, path: &Path) -> bool;

    /// Recursively list every regular file under `dir`
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, Self::Error>;

    /// Last-modification time of a file
    fn modified(&self, path: &Path) -> Result<SystemTime, Self::Error>;

    /// Delete a single file
    fn remove_file(&mut self, path: &Path) -> Result<(), Self::Error>;
}

/// Console interaction with the person running a cleanup
pub trait Operator {
    /// Error type for reading operator input
    type Error;

    /// Print one line of output
    fn say(&mut self, message: &str);

    /// Show `question` and block until one line of input is read.
    ///
    /// The returned line is interpreted by the caller.
    fn prompt(&mut self, question: &str) -> Result<String, Self::Error>;
}

/// Interpret an operator response as a yes/no decision.
///
/// Only `y` (case-insensitive, surrounding whitespace ignored) counts as yes.
pub fn is_affirmative(response: &str) -> bool {
    response.trim().eq_ignore_ascii_case("y")
}

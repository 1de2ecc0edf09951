//! File entry module - a path observed during one housekeeping run

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A regular file discovered under a housekeeping target, paired with its
/// last-modification time.
///
/// Entries are transient: they are built fresh on every run by walking the
/// target directory and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path of the file as reported by the filesystem walk
    pub path: PathBuf,

    /// Last-modification timestamp
    pub modified: SystemTime,
}

impl FileEntry {
    /// Create a new entry
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the file was last modified strictly before `cutoff`
    pub fn is_older_than(&self, cutoff: SystemTime) -> bool {
        self.modified < cutoff
    }
}

//! Filesystem collaborator backed by `std::fs` and `walkdir`

use keeper_domain::traits::FileSystem;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// The local filesystem
///
/// Directory walks descend into real subdirectories only. Symbolic links to
/// files are listed (their target's modification time is used, deleting
/// removes the link); links to directories and dangling links are skipped.
/// A subdirectory that cannot be read is skipped with a warning; only a root
/// that cannot be read fails the walk.
///
/// [`FileSystem::exists`] is true for directories only, so a regular file
/// passed as the root is reported as a missing directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a handle to the local filesystem
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    type Error = io::Error;

    fn exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, Self::Error> {
        let mut files = Vec::new();

        for result in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.path() == Some(dir) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(
                        path = ?e.path().map(Path::display),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };

            if is_listed(&entry) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, Self::Error> {
        fs::metadata(path)?.modified()
    }

    fn remove_file(&mut self, path: &Path) -> Result<(), Self::Error> {
        fs::remove_file(path)
    }
}

/// Regular files, and symlinks resolving to regular files
fn is_listed(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file()
        || (file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()))
}

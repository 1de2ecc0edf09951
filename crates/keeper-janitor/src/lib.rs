//! Keeper Janitor
//!
//! Directory housekeeping: deletes files from a directory tree under an
//! age-based or count-based retention policy.
//!
//! # Overview
//!
//! A run has three steps:
//! - **Select**: walk the tree, stat every regular file, and apply the policy
//! - **Confirm** (optional): preview the candidates and ask the operator
//! - **Delete**: best-effort; a failed file is reported and the rest continue
//!
//! The result of a run is the number of files actually deleted. A missing
//! target directory is the only fatal condition.
//!
//! | Policy | Eligible files | Nothing to do when |
//! |--------|----------------|--------------------|
//! | **By age** | modified strictly before `now - max_age` | no file is old enough |
//! | **By count** | all but the `keep` most recently modified | the tree holds at most `keep` files |
//!
//! # Usage
//!
//! ## Quick cleanup
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Delete files older than 30 days, no prompt
//! let deleted = keeper_janitor::cleanup_directory("/tmp/reports", Some(Duration::from_secs(30 * 86400)), None)?;
//!
//! // Keep the 10 newest files
//! let deleted = keeper_janitor::cleanup_directory("/tmp/builds", None, Some(10))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom collaborators
//!
//! [`Housekeeper`] is generic over a [`FileSystem`](keeper_domain::traits::FileSystem)
//! and an [`Operator`](keeper_domain::traits::Operator), so tests and embedders
//! can replace the local disk and the console.
//!
//! # Configuration
//!
//! ```toml
//! [housekeeping]
//! dry_run = false
//! preview_limit = 5
//! ```

#![warn(missing_docs)]

mod config;
mod console;
mod error;
mod fs;
mod housekeeper;

pub use config::HousekeeperConfig;
pub use console::ConsoleOperator;
pub use error::HousekeeperError;
pub use fs::LocalFileSystem;
pub use housekeeper::Housekeeper;

use std::path::Path;
use std::time::Duration;

/// Non-interactive cleanup of a local directory, reporting to stdout.
///
/// `max_age` takes precedence over `keep_count`; with neither set a usage hint
/// is printed and 0 returned. See [`Housekeeper::cleanup_directory`].
pub fn cleanup_directory(
    directory: impl AsRef<Path>,
    max_age: Option<Duration>,
    keep_count: Option<usize>,
) -> Result<usize, HousekeeperError> {
    let mut housekeeper =
        Housekeeper::default_config(LocalFileSystem::new(), ConsoleOperator::stdio());
    housekeeper.cleanup_directory(directory.as_ref(), max_age, keep_count)
}

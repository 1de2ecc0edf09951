//! Run command implementation.

use crate::commands::console_operator;
use crate::config::{Config, Target};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use keeper_domain::traits::{FileSystem, Operator};
use keeper_janitor::{Housekeeper, LocalFileSystem};
use std::fmt::Display;
use std::path::PathBuf;

/// Result of cleaning one configured target.
#[derive(Debug)]
pub struct TargetOutcome {
    /// Target directory
    pub directory: PathBuf,
    /// Files deleted, or the reason the target failed
    pub result: std::result::Result<usize, String>,
}

/// Execute the run command.
///
/// Every target is attempted; the command fails afterwards if any did.
pub fn execute_run(config: &Config, formatter: &Formatter) -> Result<()> {
    let mut housekeeper = Housekeeper::new(
        config.housekeeping.clone(),
        LocalFileSystem::new(),
        console_operator(formatter),
    );

    let outcomes = run_targets(&mut housekeeper, &config.targets);
    println!("{}", formatter.run_summary(&outcomes)?);

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::TargetsFailed(failed));
    }
    Ok(())
}

/// Clean each target non-interactively, continuing past failures.
pub fn run_targets<F, O>(housekeeper: &mut Housekeeper<F, O>, targets: &[Target]) -> Vec<TargetOutcome>
where
    F: FileSystem,
    F::Error: Display,
    O: Operator,
    O::Error: Display,
{
    targets
        .iter()
        .map(|target| {
            let result = target
                .max_age()
                .map_err(|e| e.to_string())
                .and_then(|max_age| {
                    housekeeper
                        .cleanup_directory(&target.directory, max_age, target.keep_count)
                        .map_err(|e| e.to_string())
                });

            match &result {
                Ok(deleted) => tracing::info!(
                    directory = %target.directory.display(),
                    deleted,
                    "Target cleaned"
                ),
                Err(error) => tracing::error!(
                    directory = %target.directory.display(),
                    error = %error,
                    "Target failed"
                ),
            }

            TargetOutcome {
                directory: target.directory.clone(),
                result,
            }
        })
        .collect()
}

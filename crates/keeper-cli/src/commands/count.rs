//! Count command implementation.

use crate::cli::CountArgs;
use crate::commands::console_operator;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use keeper_domain::RetentionPolicy;
use keeper_janitor::{Housekeeper, LocalFileSystem};

/// Execute the count command.
pub fn execute_count(args: CountArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut housekeeper = Housekeeper::new(
        config.housekeeping.clone(),
        LocalFileSystem::new(),
        console_operator(formatter),
    );

    let deleted = housekeeper.cleanup_by_count(&args.directory, args.keep, !args.yes)?;

    println!(
        "{}",
        formatter.cleanup_result(
            &args.directory,
            &RetentionPolicy::ByCount(args.keep),
            deleted,
            config.housekeeping.dry_run,
        )?
    );
    Ok(())
}

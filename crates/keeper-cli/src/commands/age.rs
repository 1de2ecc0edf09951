//! Age command implementation.

use crate::cli::AgeArgs;
use crate::commands::console_operator;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use keeper_domain::RetentionPolicy;
use keeper_janitor::{Housekeeper, LocalFileSystem};

/// Execute the age command.
pub fn execute_age(args: AgeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut housekeeper = Housekeeper::new(
        config.housekeeping.clone(),
        LocalFileSystem::new(),
        console_operator(formatter),
    );

    let deleted = housekeeper.cleanup_by_age(&args.directory, args.max_age, !args.yes)?;

    println!(
        "{}",
        formatter.cleanup_result(
            &args.directory,
            &RetentionPolicy::ByAge(args.max_age),
            deleted,
            config.housekeeping.dry_run,
        )?
    );
    Ok(())
}

//! Command implementations.

pub mod age;
pub mod count;
pub mod run;
pub mod show;

pub use self::age::execute_age;
pub use self::count::execute_count;
pub use self::run::{execute_run, run_targets, TargetOutcome};
pub use self::show::execute_config;

use crate::output::Formatter;
use keeper_janitor::ConsoleOperator;
use std::io::{self, StdinLock, Write};

/// Console operator used by the commands.
///
/// Prompts and progress go to stderr when results are printed as JSON, so
/// stdout stays machine readable.
pub(crate) fn console_operator(formatter: &Formatter) -> ConsoleOperator<StdinLock<'static>, Box<dyn Write>> {
    let output: Box<dyn Write> = if formatter.is_json() {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    ConsoleOperator::new(io::stdin().lock(), output)
}

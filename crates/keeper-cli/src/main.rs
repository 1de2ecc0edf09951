//! Keeper CLI - Delete old files from directory trees by age or by count.

use clap::Parser;
use keeper_cli::commands;
use keeper_cli::logging;
use keeper_cli::{Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> keeper_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, then let flags override it
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    logging::init(&config.logging)?;
    let span = tracing::info_span!("app", name = %config.logging.name);
    let _entered = span.enter();

    let formatter = Formatter::new(config.output.format, config.output.color);

    match cli.command {
        Command::Age(args) => commands::execute_age(args, &config, &formatter),
        Command::Count(args) => commands::execute_count(args, &config, &formatter),
        Command::Run => commands::execute_run(&config, &formatter),
        Command::Config => commands::execute_config(&config, &formatter),
    }
}

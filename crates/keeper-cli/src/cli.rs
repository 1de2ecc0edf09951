//! CLI command definitions and argument parsing.

use crate::config::{Config, OutputFormat};
use crate::logging::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Keeper - Delete old files by age or by count.
#[derive(Debug, Parser)]
#[command(name = "keeper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KEEPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report what would be deleted without deleting anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log level
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LevelArg>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// Log level options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LevelArg {
    /// Everything
    Trace,
    /// Selection detail
    Debug,
    /// Run summaries
    Info,
    /// Failed deletions
    Warn,
    /// Errors only
    Error,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Delete files older than a maximum age
    Age(AgeArgs),

    /// Keep only the newest files, delete the rest
    Count(CountArgs),

    /// Clean every target listed in the configuration file
    Run,

    /// Print the effective configuration
    Config,
}

/// Arguments for the age command.
#[derive(Debug, Parser)]
pub struct AgeArgs {
    /// Directory to clean (searched recursively)
    pub directory: PathBuf,

    /// Maximum age, e.g. 7d, 12h, 30m (a bare number means days)
    #[arg(short = 'a', long, value_parser = keeper_domain::parse_age)]
    pub max_age: Duration,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the count command.
#[derive(Debug, Parser)]
pub struct CountArgs {
    /// Directory to clean (searched recursively)
    pub directory: PathBuf,

    /// Number of most recently modified files to keep
    #[arg(short, long)]
    pub keep: usize,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if self.no_color {
            config.output.color = false;
        }
        if self.dry_run {
            config.housekeeping.dry_run = true;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level.into();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Trace => LogLevel::Trace,
            LevelArg::Debug => LogLevel::Debug,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Warn => LogLevel::Warn,
            LevelArg::Error => LogLevel::Error,
        }
    }
}

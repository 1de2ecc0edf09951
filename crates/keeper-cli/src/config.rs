//! Configuration management for the CLI.
//!
//! Loaded from TOML: an explicit `--config` path, or `~/.keeper/config.toml`
//! when present. Missing sections fall back to defaults.

use crate::error::{CliError, Result};
use crate::logging::LoggingConfig;
use keeper_janitor::HousekeeperConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Housekeeping behaviour shared by all commands
    #[serde(default)]
    pub housekeeping: HousekeeperConfig,

    /// Output settings
    #[serde(default)]
    pub output: Settings,

    /// Directories cleaned by `keeper run`
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON objects
    Json,
}

/// A directory cleaned non-interactively by `keeper run`.
///
/// `max_age` takes precedence over `keep_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Directory to clean
    pub directory: PathBuf,

    /// Age threshold such as "7d" or "12h"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,

    /// Number of newest files to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_count: Option<usize>,
}

impl Target {
    /// Parsed age threshold, if one is set.
    pub fn max_age(&self) -> Result<Option<Duration>> {
        self.max_age
            .as_deref()
            .map(|age| {
                keeper_domain::parse_age(age).map_err(|e| {
                    CliError::Config(format!("Target {}: {}", self.directory.display(), e))
                })
            })
            .transpose()
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".keeper").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every target's age threshold.
    pub fn validate(&self) -> Result<()> {
        for target in &self.targets {
            target.max_age()?;
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_true() -> bool {
    true
}

//! Output formatting for the CLI.

use crate::commands::TargetOutcome;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use keeper_domain::RetentionPolicy;
use std::path::Path;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// True when results are printed as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Format the result of a single cleanup.
    pub fn cleanup_result(
        &self,
        directory: &Path,
        policy: &RetentionPolicy,
        deleted: usize,
        dry_run: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let limit = match policy {
                    RetentionPolicy::ByAge(max_age) => serde_json::json!(max_age.as_secs()),
                    RetentionPolicy::ByCount(keep) => serde_json::json!(keep),
                };
                let value = serde_json::json!({
                    "directory": directory.display().to_string(),
                    "policy": policy.as_str(),
                    "limit": limit,
                    "deleted": deleted,
                    "dry_run": dry_run,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Text => {
                if dry_run {
                    return Ok(self.info(&format!(
                        "Dry run: nothing deleted from {} ({})",
                        directory.display(),
                        policy
                    )));
                }
                Ok(self.success(&format!(
                    "Deleted {} file(s) from {} ({})",
                    deleted,
                    directory.display(),
                    policy
                )))
            }
        }
    }

    /// Format the per-target results of `keeper run`.
    pub fn run_summary(&self, outcomes: &[TargetOutcome]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = outcomes
                    .iter()
                    .map(|outcome| match &outcome.result {
                        Ok(deleted) => serde_json::json!({
                            "directory": outcome.directory.display().to_string(),
                            "deleted": deleted,
                        }),
                        Err(error) => serde_json::json!({
                            "directory": outcome.directory.display().to_string(),
                            "error": error,
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Text => {
                if outcomes.is_empty() {
                    return Ok(self.warning("No targets configured."));
                }
                let lines: Vec<String> = outcomes
                    .iter()
                    .map(|outcome| match &outcome.result {
                        Ok(deleted) => self.success(&format!(
                            "{}: deleted {} file(s)",
                            outcome.directory.display(),
                            deleted
                        )),
                        Err(error) => {
                            self.error(&format!("{}: {}", outcome.directory.display(), error))
                        }
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

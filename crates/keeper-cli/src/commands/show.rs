//! Config command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Print the effective configuration, after command-line overrides.
pub fn execute_config(config: &Config, formatter: &Formatter) -> Result<()> {
    if formatter.is_json() {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

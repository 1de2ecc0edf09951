//! Logging setup for the CLI.
//!
//! Installs a `tracing-subscriber` registry writing to stderr and, when a
//! destination is configured, to a log file as well. `RUST_LOG` takes
//! precedence over the configured level.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Application name, attached to every event through the root span
    #[serde(default = "default_name")]
    pub name: String,

    /// Minimum level
    #[serde(default)]
    pub level: LogLevel,

    /// Log file, written in addition to stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Directory for a dated log file, used when `file` is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Event format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Selection detail and individual deletions
    Debug,
    /// Run summaries (default)
    #[default]
    Info,
    /// Failed deletions
    Warn,
    /// Failed runs only
    Error,
}

/// Event format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Timestamp, level, target, file and line (default)
    #[default]
    Full,
    /// Single abbreviated line per event
    Compact,
    /// Multi-line, human oriented
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl LogLevel {
    /// Level name as understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl LoggingConfig {
    /// File events are written to, if any.
    pub fn destination(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            self.directory
                .as_deref()
                .map(|dir| default_log_file(dir, &self.name))
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            level: LogLevel::default(),
            file: None,
            directory: None,
            format: LogFormat::default(),
        }
    }
}

fn default_name() -> String {
    "keeper".to_string()
}

/// Dated log file under `base_dir`: `<base_dir>/logs/<name>_YYYYMMDD.log`.
pub fn default_log_file(base_dir: &Path, name: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d");
    base_dir.join("logs").join(format!("{}_{}.log", name, stamp))
}

/// Install the global subscriber.
///
/// Fails with [`CliError::Logging`] if a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let mut layers: Vec<BoxedLayer> = vec![format_layer(config.format, std::io::stderr, true)];

    if let Some(path) = config.destination() {
        let file = open_log_file(&path)?;
        layers.push(format_layer(config.format, Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Open `path` for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Logging(format!("Cannot open log file {}: {}", path.display(), e)))
}

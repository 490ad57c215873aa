//! Tracing setup for Placefind
//!
//! Provides dual output: console logs at a user-controlled level, and an
//! append-only error log with one file per calendar day
//! (`logs/error-YYYY-MM-DD.log`).

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::{PlacefindError, Result};

/// Writer factory that appends to the error log file for the current day.
///
/// The file is reopened for every event so a long-running session rolls over
/// to a new file at midnight. If the file cannot be opened the event goes to
/// stderr instead of being lost.
#[derive(Debug, Clone)]
pub struct DailyLogWriter {
    logs_dir: PathBuf,
}

impl DailyLogWriter {
    /// Creates a writer for the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// - `std::io::Error` - If the directory cannot be created
    pub fn new(logs_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let logs_dir = logs_dir.into();
        create_dir_all(&logs_dir)?;
        Ok(Self { logs_dir })
    }

    /// Path of the error log for a given day.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.logs_dir
            .join(format!("error-{}.log", date.format("%Y-%m-%d")))
    }

    /// Path of today's error log.
    pub fn current_path(&self) -> PathBuf {
        self.path_for(Local::now().date_naive())
    }

    fn open_current(&self) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())
    }
}

impl<'a> MakeWriter<'a> for DailyLogWriter {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.open_current() {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!(
                    "failed to open error log {}: {e}",
                    self.current_path().display()
                );
                Box::new(io::stderr())
            }
        }
    }
}

/// Initialize tracing with dual output: console (user level) + daily error log
///
/// # Arguments
/// * `console_level` - Log level for console output (overridden by `RUST_LOG`)
/// * `logs_dir` - Directory for daily error logs (defaults to "./logs")
///
/// # Errors
///
/// - `PlacefindError::Logging` - If the logs directory cannot be created or a
///   global subscriber is already installed
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<()> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));

    let error_log = DailyLogWriter::new(logs_path).map_err(|e| PlacefindError::Logging {
        reason: format!("cannot create {}: {e}", logs_path.display()),
    })?;
    let error_log_path = error_log.current_path();

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // Warnings and errors only; this file is what users attach to bug reports.
    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(error_log)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PlacefindError::Logging {
            reason: e.to_string(),
        })?;

    tracing::debug!(
        "Tracing initialized: console={}, error_log={}",
        console_level,
        error_log_path.display()
    );

    Ok(())
}

/// CLI log levels for user control
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use placefind_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

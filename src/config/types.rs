//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::TARGET_ENCODING_DEFAULT;
use super::paths;
use crate::mapping::TranslationTable;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration. Read-only once the walk starts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to repair
    pub start_dir: Option<PathBuf>,
    /// Encoding new names must decode under (WHATWG label)
    pub target_encoding: String,
    /// Ordered byte substitutions
    pub table: TranslationTable,
    /// If true, report planned renames but do not touch the filesystem
    pub dry_run: bool,
    /// If true, leave names that already decode under the target untouched
    pub verify_first: bool,
    /// If true, announce the top directory levels of live runs
    pub verbose: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            target_encoding: TARGET_ENCODING_DEFAULT.to_string(),
            table: TranslationTable::builtin(),
            // Safe by default: a destructive run must be asked for.
            dry_run: true,
            verify_first: true,
            verbose: true,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path().ok(),
        }
    }
}

impl Config {
    /// Construct a Config for `start_dir`; other fields use defaults.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: Some(start_dir.into()),
            ..Default::default()
        }
    }
}

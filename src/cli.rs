//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.
//! - --dry-run and --apply are mutually exclusive; without either the config decides.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Repair mis-encoded file and directory names below a directory.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Repair mis-encoded file names by byte substitution, then verify them"
)]
pub struct Args {
    /// Root of the tree to repair (overrides <start_dir> from the config).
    #[arg(value_name = "START_DIR", value_hint = ValueHint::DirPath)]
    pub start_dir: Option<PathBuf>,

    /// Only print planned renames (REN: old -> new); never touch the filesystem.
    #[arg(long, conflicts_with = "apply")]
    pub dry_run: bool,

    /// Perform the renames (overrides dry_run=true from the config).
    #[arg(long)]
    pub apply: bool,

    /// Translate every name, even ones that already decode under the target encoding.
    #[arg(long)]
    pub no_verify_first: bool,

    /// Print DIR: lines for the top directory levels.
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress DIR: lines.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Encoding new names must decode under (e.g. utf-8, windows-1252).
    #[arg(long, value_name = "LABEL")]
    pub target_encoding: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where replmv will look for the config file (or REPLMV_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by replmv and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.start_dir {
            cfg.start_dir = Some(dir.clone());
        }
        if let Some(enc) = &self.target_encoding {
            cfg.target_encoding = enc.trim().to_string();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.apply {
            cfg.dry_run = false;
        }
        if self.no_verify_first {
            cfg.verify_first = false;
        }
        if self.verbose {
            cfg.verbose = true;
        }
        if self.quiet {
            cfg.verbose = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

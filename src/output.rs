//! User-facing console output.
//!
//! Small wrappers around stdout/stderr printing for consistent, colored
//! messages, plus the reporter that turns walk diagnostics into `DIR:`,
//! `REN:` and `ERR:` lines.

use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Diagnostic lines go through
/// here so scripts can grep for `REN:` and `ERR:`.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Target under which every diagnostic is mirrored into tracing. The console
/// layer filters it out (the line is already on stdout); file logging keeps it
/// as the audit trail of the run.
pub const DIAGNOSTIC_TARGET: &str = "replmv::diagnostic";

/// Prints diagnostics to stdout, one line each, and mirrors them to tracing.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    lines: usize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines printed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl DiagnosticSink for ConsoleReporter {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let line = diagnostic.to_string();
        match &diagnostic {
            Diagnostic::Problem(e) => {
                warn!(target: DIAGNOSTIC_TARGET, code = e.code(), "{line}")
            }
            _ => info!(target: DIAGNOSTIC_TARGET, "{line}"),
        }
        print_user(&line);
        self.lines += 1;
    }
}

//! Diagnostic lines produced while walking a tree.
//!
//! The walker never prints; it hands every decision to a `DiagnosticSink`.
//! The binary plugs in a console reporter, tests collect into a `Vec`.

use std::fmt;
use std::path::PathBuf;

use crate::errors::EntryError;

#[derive(Debug)]
pub enum Diagnostic {
    /// Entering a directory (verbose, live runs, shallow levels only).
    EnterDir { path: PathBuf },
    /// Dry run: what would be renamed.
    PlannedRename { from: PathBuf, to: PathBuf },
    /// Live run: a rename that completed.
    Renamed { to: PathBuf },
    /// Any recoverable failure.
    Problem(EntryError),
}

impl Diagnostic {
    pub fn is_problem(&self) -> bool {
        matches!(self, Diagnostic::Problem(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EnterDir { path } => write!(f, "DIR: {}", path.display()),
            Diagnostic::PlannedRename { from, to } => {
                write!(f, "REN: {} -> {}", from.display(), to.display())
            }
            Diagnostic::Renamed { to } => write!(f, "REN: {}", to.display()),
            Diagnostic::Problem(e) => write!(f, "ERR: {e}"),
        }
    }
}

impl From<EntryError> for Diagnostic {
    fn from(e: EntryError) -> Self {
        Diagnostic::Problem(e)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_their_prefixes() {
        let d = Diagnostic::PlannedRename {
            from: PathBuf::from("/t/a"),
            to: PathBuf::from("/t/b"),
        };
        assert_eq!(d.to_string(), "REN: /t/a -> /t/b");
        assert_eq!(
            Diagnostic::Renamed { to: PathBuf::from("/t/b") }.to_string(),
            "REN: /t/b"
        );
        assert_eq!(
            Diagnostic::EnterDir { path: PathBuf::from("/t") }.to_string(),
            "DIR: /t"
        );
        let err: Diagnostic = EntryError::Collision {
            from: PathBuf::from("/t/a"),
            to: PathBuf::from("/t/b"),
        }
        .into();
        assert!(err.is_problem());
        assert!(err.to_string().starts_with("ERR: target already exists"));
    }

    #[cfg(unix)]
    #[test]
    fn unverified_names_are_escaped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let d: Diagnostic = EntryError::Unverified {
            name: OsStr::from_bytes(b"caf\xe9").to_os_string(),
            encoding: "UTF-8",
        }
        .into();
        let line = d.to_string();
        assert!(line.contains("\\xE9"), "line was: {line}");
        assert!(line.contains("did not verify as UTF-8"));
    }
}

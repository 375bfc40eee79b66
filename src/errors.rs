//! Typed error definitions for replmv.
//!
//! Two families, split by effect:
//! - `EntryError`: recoverable, affects one entry or one subtree; reported and skipped.
//! - `WalkError`: fatal; unwinds the whole walk.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{name:?} did not verify as {encoding} after translation")]
    Unverified {
        name: OsString,
        encoding: &'static str,
    },

    #[error("{name:?} would become {candidate:?}, which is not a single name")]
    NotAName { name: OsString, candidate: OsString },

    #[error("can not list {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("target already exists - can not rename {} to {}", from.display(), to.display())]
    Collision { from: PathBuf, to: PathBuf },

    #[error("can not rename {} to {}: {message}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error("can not inspect {}: {message}", path.display())]
    Inspect { path: PathBuf, message: String },
}

impl EntryError {
    /// Stable short code for logs and scripts.
    pub fn code(&self) -> &'static str {
        match self {
            EntryError::Unverified { .. } => "E_UNVERIFIED",
            EntryError::NotAName { .. } => "E_NOT_A_NAME",
            EntryError::ListDir { .. } => "E_LIST_DIR",
            EntryError::Collision { .. } => "E_COLLISION",
            EntryError::RenameFailed { .. } => "E_RENAME",
            EntryError::Inspect { .. } => "E_INSPECT",
        }
    }
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("too deeply nested directories (loop?): depth {depth} exceeds {max} at {}", path.display())]
    DepthExceeded {
        path: PathBuf,
        depth: usize,
        max: usize,
    },
}

impl WalkError {
    pub fn code(&self) -> &'static str {
        match self {
            WalkError::DepthExceeded { .. } => "E_DEPTH",
        }
    }
}

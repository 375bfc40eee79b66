//! Collision-checked rename of a single entry.
//!
//! POSIX rename(2) silently replaces an existing target, so the target is
//! checked first. Check and rename are not atomic; replmv assumes it is the
//! only writer in the tree while it runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::helpers::build_message;
use super::util::fsync_dir;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::EntryError;

/// What `move_entry` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Dry run: nothing touched.
    Planned,
    /// Source and target are the same path.
    Unchanged,
    Renamed,
    /// Target exists; source kept.
    Collision,
    /// rename(2) or the existence check failed; source kept.
    Failed,
}

/// Rename `old` to `new` unless dry-running or the target exists.
///
/// Returns the path the entry has afterwards: `new` only when the rename
/// happened, `old` in every other case.
pub fn move_entry(
    old: &Path,
    new: &Path,
    dry_run: bool,
    sink: &mut dyn DiagnosticSink,
) -> (PathBuf, MoveOutcome) {
    if dry_run {
        return (old.to_path_buf(), MoveOutcome::Planned);
    }
    if old == new {
        return (old.to_path_buf(), MoveOutcome::Unchanged);
    }

    // symlink_metadata: a dangling symlink at the target counts as existing.
    match fs::symlink_metadata(new) {
        Ok(_) => {
            debug!(from = %old.display(), to = %new.display(), "rename target exists");
            sink.emit(Diagnostic::Problem(EntryError::Collision {
                from: old.to_path_buf(),
                to: new.to_path_buf(),
            }));
            return (old.to_path_buf(), MoveOutcome::Collision);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            sink.emit(Diagnostic::Problem(EntryError::RenameFailed {
                from: old.to_path_buf(),
                to: new.to_path_buf(),
                message: build_message("check target", new, &e),
            }));
            return (old.to_path_buf(), MoveOutcome::Failed);
        }
    }

    match fs::rename(old, new) {
        Ok(()) => {
            if let Some(parent) = new.parent() {
                // Best-effort durability; the rename itself already succeeded.
                let _ = fsync_dir(parent);
            }
            info!(from = %old.display(), to = %new.display(), "renamed");
            (new.to_path_buf(), MoveOutcome::Renamed)
        }
        Err(e) => {
            sink.emit(Diagnostic::Problem(EntryError::RenameFailed {
                from: old.to_path_buf(),
                to: new.to_path_buf(),
                message: build_message("rename", old, &e),
            }));
            (old.to_path_buf(), MoveOutcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn dry_run_touches_nothing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("a");
        src.touch().unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (p, outcome) = move_entry(src.path(), &dir.path().join("b"), true, &mut sink);
        assert_eq!(outcome, MoveOutcome::Planned);
        assert_eq!(p, src.path());
        assert!(src.path().exists());
        assert!(!dir.path().join("b").exists());
        assert!(sink.is_empty());
    }

    #[test]
    fn same_path_is_unchanged() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("a");
        src.touch().unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (p, outcome) = move_entry(src.path(), src.path(), false, &mut sink);
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(p, src.path());
    }

    #[test]
    fn renames_when_target_free() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("a");
        src.write_str("payload").unwrap();
        let dst = dir.path().join("b");
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (p, outcome) = move_entry(src.path(), &dst, false, &mut sink);
        assert_eq!(outcome, MoveOutcome::Renamed);
        assert_eq!(p, dst);
        assert!(!src.path().exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
        assert!(sink.is_empty());
    }

    #[test]
    fn existing_target_is_never_replaced() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("a");
        src.write_str("source").unwrap();
        let dst = dir.child("b");
        dst.write_str("target").unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (p, outcome) = move_entry(src.path(), dst.path(), false, &mut sink);
        assert_eq!(outcome, MoveOutcome::Collision);
        assert_eq!(p, src.path());
        assert_eq!(fs::read_to_string(src.path()).unwrap(), "source");
        assert_eq!(fs::read_to_string(dst.path()).unwrap(), "target");
        assert!(matches!(sink[0], Diagnostic::Problem(EntryError::Collision { .. })));
    }

    #[test]
    fn dangling_symlink_target_counts_as_existing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("a");
        src.touch().unwrap();
        let dst = dir.path().join("b");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &dst).unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (_, outcome) = move_entry(src.path(), &dst, false, &mut sink);
        assert_eq!(outcome, MoveOutcome::Collision);
        assert!(fs::symlink_metadata(&dst).unwrap().file_type().is_symlink());
    }

    #[test]
    fn vanished_source_is_a_failure() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let (p, outcome) = move_entry(&dir.path().join("gone"), &dir.path().join("b"), false, &mut sink);
        assert_eq!(outcome, MoveOutcome::Failed);
        assert_eq!(p, dir.path().join("gone"));
        let line = sink[0].to_string();
        assert!(line.contains("path not found"), "line was: {line}");
    }
}

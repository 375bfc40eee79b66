//! Depth-first, pre-order walk that repairs names as it goes.
//!
//! Each entry is renamed before its subtree is visited, and the subtree is
//! then listed under the entry's effective path (the new one after a live
//! rename, the original one in a dry run or when the rename was refused).
//! Symlinks are never followed.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::helpers::build_message;
use super::mover::{MoveOutcome, move_entry};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::{EntryError, WalkError};
use crate::mapping::NameMapper;

/// Nesting limit; exceeding it aborts the run.
pub const MAX_DEPTH: usize = 100;

/// Immutable settings for one walk.
#[derive(Debug, Clone)]
pub struct WalkSettings {
    pub mapper: NameMapper,
    /// Report decisions only; never touch the filesystem.
    pub dry_run: bool,
    /// Emit `DIR:` lines for the top levels of live runs.
    pub verbose: bool,
}

/// Tallies for the end-of-run summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub dirs_visited: usize,
    pub entries_seen: usize,
    pub planned: usize,
    pub renamed: usize,
    pub collisions: usize,
    pub rename_failures: usize,
    pub unverified: usize,
    pub not_a_name: usize,
    pub unreadable_dirs: usize,
    pub inspect_failures: usize,
}

impl WalkStats {
    /// Number of recoverable problems reported.
    pub fn problems(&self) -> usize {
        self.collisions
            + self.rename_failures
            + self.unverified
            + self.not_a_name
            + self.unreadable_dirs
            + self.inspect_failures
    }
}

/// Walk `start` with `settings`, reporting to `sink`.
///
/// Only the depth guard is fatal; every other failure is reported and the
/// walk continues with the next entry or sibling subtree.
pub fn walk(
    settings: &WalkSettings,
    start: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<WalkStats, WalkError> {
    let mut walker = Walker::new(settings, sink);
    walker.walk_dir(start, 0)?;
    Ok(walker.into_stats())
}

pub struct Walker<'a> {
    settings: &'a WalkSettings,
    sink: &'a mut dyn DiagnosticSink,
    stats: WalkStats,
}

impl<'a> Walker<'a> {
    pub fn new(settings: &'a WalkSettings, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            settings,
            sink,
            stats: WalkStats::default(),
        }
    }

    pub fn into_stats(self) -> WalkStats {
        self.stats
    }

    /// Process every entry of `dir`, which sits `depth` levels below the start.
    pub fn walk_dir(&mut self, dir: &Path, depth: usize) -> Result<(), WalkError> {
        if depth > MAX_DEPTH {
            return Err(WalkError::DepthExceeded {
                path: dir.to_path_buf(),
                depth,
                max: MAX_DEPTH,
            });
        }
        let settings = self.settings;
        if settings.verbose && !settings.dry_run && depth < 3 {
            self.emit(Diagnostic::EnterDir {
                path: dir.to_path_buf(),
            });
        }

        // Read the whole listing before renaming anything in it.
        let names = match list_names(dir) {
            Ok(names) => names,
            Err(source) => {
                self.emit(Diagnostic::Problem(EntryError::ListDir {
                    path: dir.to_path_buf(),
                    source,
                }));
                return Ok(());
            }
        };
        self.stats.dirs_visited += 1;
        trace!(dir = %dir.display(), depth, entries = names.len(), "listed");

        for name in names {
            self.stats.entries_seen += 1;
            let path = dir.join(&name);
            let mapped = settings.mapper.map(&name, self);

            let effective = if *mapped == *name {
                path
            } else {
                let target = dir.join(&*mapped);
                if settings.dry_run {
                    self.emit(Diagnostic::PlannedRename {
                        from: path.clone(),
                        to: target.clone(),
                    });
                }
                let (resulting, outcome) = move_entry(&path, &target, settings.dry_run, self);
                if outcome == MoveOutcome::Renamed {
                    self.emit(Diagnostic::Renamed {
                        to: resulting.clone(),
                    });
                }
                debug!(from = %path.display(), to = %target.display(), ?outcome, "rename decision");
                resulting
            };

            match fs::symlink_metadata(&effective) {
                Ok(meta) if meta.is_dir() => self.walk_dir(&effective, depth + 1)?,
                Ok(_) => {}
                Err(e) => self.emit(Diagnostic::Problem(EntryError::Inspect {
                    path: effective.clone(),
                    message: build_message("stat", &effective, &e),
                })),
            }
        }
        Ok(())
    }
}

impl DiagnosticSink for Walker<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let stats = &mut self.stats;
        match &diagnostic {
            Diagnostic::EnterDir { .. } => {}
            Diagnostic::PlannedRename { .. } => stats.planned += 1,
            Diagnostic::Renamed { .. } => stats.renamed += 1,
            Diagnostic::Problem(e) => match e {
                EntryError::Unverified { .. } => stats.unverified += 1,
                EntryError::NotAName { .. } => stats.not_a_name += 1,
                EntryError::ListDir { .. } => stats.unreadable_dirs += 1,
                EntryError::Collision { .. } => stats.collisions += 1,
                EntryError::RenameFailed { .. } => stats.rename_failures += 1,
                EntryError::Inspect { .. } => stats.inspect_failures += 1,
            },
        }
        self.sink.emit(diagnostic);
    }
}

fn list_names(dir: &Path) -> std::io::Result<Vec<OsString>> {
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}

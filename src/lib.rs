//! Core library for `replmv`.
//!
//! Repairs file and directory names whose bytes were written in the wrong
//! encoding: each name is run through an ordered byte-substitution table,
//! checked against the target encoding, and renamed in place with a collision
//! check. Keep the library small: a Config type with sensible defaults, a
//! method to validate it, and a walker that reports every decision through a
//! `DiagnosticSink`.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fs_ops;
pub mod mapping;
pub mod output;
pub mod platform;

pub use config::types::{Config, LogLevel};
pub use config::{
    CONFIG_ENV, LoadResult, default_config_path, default_log_path, load_config_from_xml_path,
    load_or_init, path_has_symlink_ancestor,
};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use errors::{EntryError, WalkError};
pub use fs_ops::{
    MAX_DEPTH, MoveOutcome, TreeLock, WalkSettings, WalkStats, Walker, acquire_tree_lock,
    io_error_with_help, move_entry, walk,
};
pub use mapping::{EncodingValidator, Mapping, NameMapper, Rule, TableError, TranslationTable};
pub use output::ConsoleReporter;

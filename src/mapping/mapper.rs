//! Verify-first name mapping with fallback to the original name.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use tracing::trace;

use super::table::TranslationTable;
use super::validator::EncodingValidator;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::EntryError;

/// Outcome of mapping one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    /// Verify-first hit: the name is already valid, translation skipped.
    AlreadyValid,
    /// Translation changed the name and the result verified.
    Translated(Vec<u8>),
    /// Translation left the name as is and it verified.
    Unchanged,
    /// The translated candidate is not valid text; keep the original.
    Rejected,
    /// The candidate is not a single entry name (empty, `.`, `..`, or
    /// contains `/` or NUL); keep the original.
    NotAName(Vec<u8>),
}

/// True when `bytes` names exactly one entry inside its parent directory.
fn is_single_name(bytes: &[u8]) -> bool {
    !matches!(bytes, b"" | b"." | b"..") && !bytes.iter().any(|&b| b == b'/' || b == 0)
}

/// Maps raw entry names to their repaired form.
///
/// Never yields a name that fails verification: the worst case is a no-op.
#[derive(Debug, Clone)]
pub struct NameMapper {
    table: TranslationTable,
    validator: EncodingValidator,
    verify_first: bool,
}

impl NameMapper {
    pub fn new(table: TranslationTable, validator: EncodingValidator, verify_first: bool) -> Self {
        Self {
            table,
            validator,
            verify_first,
        }
    }

    /// Decide what should happen to `name` without side effects.
    pub fn classify(&self, name: &[u8]) -> Mapping {
        if self.verify_first && self.validator.is_valid_text(name) {
            return Mapping::AlreadyValid;
        }
        let candidate = self.table.translate(name);
        if candidate != name && !is_single_name(&candidate) {
            Mapping::NotAName(candidate)
        } else if !self.validator.is_valid_text(&candidate) {
            Mapping::Rejected
        } else if candidate == name {
            Mapping::Unchanged
        } else {
            Mapping::Translated(candidate)
        }
    }

    /// Effective name for `name`; reports a refused candidate to `sink`.
    pub fn map<'a>(&self, name: &'a OsStr, sink: &mut dyn DiagnosticSink) -> Cow<'a, OsStr> {
        match self.classify(name.as_bytes()) {
            Mapping::Translated(bytes) => Cow::Owned(OsString::from_vec(bytes)),
            Mapping::AlreadyValid | Mapping::Unchanged => Cow::Borrowed(name),
            Mapping::Rejected => {
                trace!(name = ?name, "translated name did not verify");
                sink.emit(Diagnostic::Problem(EntryError::Unverified {
                    name: name.to_os_string(),
                    encoding: self.validator.name(),
                }));
                Cow::Borrowed(name)
            }
            Mapping::NotAName(candidate) => {
                trace!(name = ?name, "translated name is not a single entry name");
                sink.emit(Diagnostic::Problem(EntryError::NotAName {
                    name: name.to_os_string(),
                    candidate: OsString::from_vec(candidate),
                }));
                Cow::Borrowed(name)
            }
        }
    }
}

//! Ordered byte-sequence substitution table.
//!
//! Rules are applied one after another; each rule rewrites the output of the
//! previous one, so a later rule can match bytes an earlier rule introduced
//! (cascading substitution). Within a single rule, matches are found left to
//! right and never overlap.

use thiserror::Error;

/// One `from -> to` substitution. `from` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    from: Vec<u8>,
    to: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("rule {index}: empty `from` sequence would match everywhere")]
    EmptyPattern { index: usize },

    #[error("rule {index}: invalid hex in `{field}`: {reason}")]
    BadHex {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

impl Rule {
    pub fn new(from: impl Into<Vec<u8>>, to: impl Into<Vec<u8>>) -> Result<Self, TableError> {
        let from = from.into();
        if from.is_empty() {
            return Err(TableError::EmptyPattern { index: 0 });
        }
        Ok(Self { from, to: to.into() })
    }

    pub fn from_bytes(&self) -> &[u8] {
        &self.from
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.to
    }

    /// Replace every non-overlapping occurrence of `from` in `input`.
    fn apply(&self, input: &[u8]) -> Vec<u8> {
        let n = self.from.len();
        let mut out = Vec::with_capacity(input.len());
        let mut i = 0;
        while i < input.len() {
            if input.len() - i >= n && input[i..i + n] == self.from[..] {
                out.extend_from_slice(&self.to);
                i += n;
            } else {
                out.push(input[i]);
                i += 1;
            }
        }
        out
    }
}

// ISO-8859-1 byte -> UTF-8 bytes for the characters that usually go wrong.
// Symbols come first: their sources (0xA9, 0xAE, 0xB0) are also UTF-8
// continuation bytes, and "é" encodes as C3 A9.
const BUILTIN: &[(&[u8], &[u8])] = &[
    // Symbols
    (b"\xa9", "©".as_bytes()),
    (b"\xae", "®".as_bytes()),
    (b"\xb0", "°".as_bytes()),
    // German
    (b"\xe4", "ä".as_bytes()),
    (b"\xf6", "ö".as_bytes()),
    (b"\xfc", "ü".as_bytes()),
    (b"\xc4", "Ä".as_bytes()),
    (b"\xd6", "Ö".as_bytes()),
    (b"\xdc", "Ü".as_bytes()),
    (b"\xdf", "ß".as_bytes()),
    // French
    (b"\xe2", "â".as_bytes()),
    (b"\xe0", "à".as_bytes()),
    (b"\xe9", "é".as_bytes()),
    (b"\xe8", "è".as_bytes()),
    (b"\xea", "ê".as_bytes()),
    (b"\xeb", "ë".as_bytes()),
    (b"\xe7", "ç".as_bytes()),
    (b"\xf4", "ô".as_bytes()),
];

/// Ordered list of rules. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    rules: Vec<Rule>,
}

impl TranslationTable {
    /// Build a table from raw pairs, rejecting empty patterns.
    pub fn new<I, F, T>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<Vec<u8>>,
        T: Into<Vec<u8>>,
    {
        let rules = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (from, to))| {
                Rule::new(from, to).map_err(|_| TableError::EmptyPattern { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Build a table from hex-encoded pairs such as `("e4", "c3a4")`.
    pub fn from_hex_pairs<'a, I>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let decode = |index: usize, field: &'static str, s: &str| {
            hex::decode(s.trim()).map_err(|e| TableError::BadHex {
                index,
                field,
                reason: e.to_string(),
            })
        };
        let mut raw = Vec::new();
        for (index, (from, to)) in pairs.into_iter().enumerate() {
            raw.push((decode(index, "from", from)?, decode(index, "to", to)?));
        }
        Self::new(raw)
    }

    /// Latin-1 to UTF-8 table for common German, French and symbol characters.
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN
                .iter()
                .map(|(from, to)| Rule {
                    from: from.to_vec(),
                    to: to.to_vec(),
                })
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order, each on the previous rule's output.
    pub fn translate(&self, input: &[u8]) -> Vec<u8> {
        self.rules
            .iter()
            .fold(input.to_vec(), |acc, rule| rule.apply(&acc))
    }
}

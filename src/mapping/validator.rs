//! Strict decode check of a byte sequence under a named encoding.

use encoding_rs::Encoding;
use std::fmt;

/// Checks whether bytes are well-formed text in one encoding.
///
/// Decoding is strict: no BOM sniffing, no replacement characters. For
/// single-byte encodings every input decodes, so only multi-byte targets
/// (the UTF family, CJK encodings) actually discriminate.
#[derive(Clone, Copy)]
pub struct EncodingValidator {
    encoding: &'static Encoding,
}

impl EncodingValidator {
    /// Resolve a WHATWG encoding label (`utf-8`, `latin1`, `shift_jis`, ...).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(|encoding| Self { encoding })
    }

    pub fn utf8() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// True when every byte sequence decodes, making verification a no-op.
    pub fn is_single_byte(&self) -> bool {
        self.encoding.is_single_byte()
    }

    pub fn is_valid_text(&self, bytes: &[u8]) -> bool {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .is_some()
    }
}

impl fmt::Debug for EncodingValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodingValidator").field(&self.name()).finish()
    }
}

impl PartialEq for EncodingValidator {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding
    }
}

impl Eq for EncodingValidator {}

//! Encoding fallback chain for RIS exports.
//!
//! Exports come from many databases and operating systems, so a file is tried
//! against an ordered list of encodings and the first strict decode wins.

use crate::error::{AnalysisError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ordered list of candidate encodings, tried first to last.
///
/// The default chain is UTF-8 followed by windows-1252. The WHATWG labels
/// `latin1`, `iso-8859-1` and `cp1252` all resolve to windows-1252, which maps
/// every byte, so the default chain only fails on files it cannot read at all.
///
/// Because of that mapping, bytes `0x80` to `0x9F` decode as the windows-1252
/// punctuation (curly quotes, dashes, `€`) rather than as C1 control
/// characters. Raw labels such as author or source names keep that
/// punctuation; normalized keywords and phrases are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingChain {
    candidates: Vec<&'static Encoding>,
}

impl Default for EncodingChain {
    fn default() -> Self {
        Self {
            candidates: vec![UTF_8, WINDOWS_1252],
        }
    }
}

impl EncodingChain {
    /// Build a chain from WHATWG encoding labels such as `"utf-8"` or
    /// `"iso-8859-1"`. Labels resolving to an encoding already in the chain
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownEncoding`] for an unrecognized label and
    /// [`AnalysisError::NoEncodings`] when `labels` is empty.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates: Vec<&'static Encoding> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            let encoding = Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| AnalysisError::UnknownEncoding(label.to_string()))?;
            if !candidates.contains(&encoding) {
                candidates.push(encoding);
            }
        }

        if candidates.is_empty() {
            return Err(AnalysisError::NoEncodings);
        }

        Ok(Self { candidates })
    }

    /// Names of the encodings in the chain, in trial order.
    pub fn names(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|encoding| encoding.name().to_string())
            .collect()
    }

    /// Decode `bytes` with the first encoding that accepts them without
    /// replacement characters. A leading UTF-8 byte-order mark is dropped
    /// whichever encoding ends up accepting the rest.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Option<(Cow<'b, str>, &'static Encoding)> {
        let input = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        self.candidates.iter().find_map(|&encoding| {
            encoding
                .decode_without_bom_handling_and_without_replacement(input)
                .map(|text| (text, encoding))
        })
    }
}

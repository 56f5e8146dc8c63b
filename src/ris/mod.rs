//! RIS format parser implementation.
//!
//! Provides functionality to turn RIS exports into [`RisRecord`]s, decoding
//! raw bytes through a configurable [`EncodingChain`].
//!
//! # Example
//!
//! ```
//! use risstats::ris::{RisParser, RisTag};
//!
//! let input = r#"TY  - JOUR
//! T2  - Journal of Waste
//! AU  - Silva, J.
//! ER  -"#;
//!
//! let parser = RisParser::new();
//!
//! let records = parser.parse_str(input);
//! assert_eq!(records[0].get_str(&RisTag::SecondaryTitle), Some("Journal of Waste"));
//! ```

mod decode;
mod parse;
mod structure;
mod tags;

pub use decode::EncodingChain;
pub use structure::{FieldValue, RisRecord};
pub use tags::RisTag;

use crate::error::{AnalysisError, Result};
use encoding_rs::Encoding;
use parse::ris_parse;
use std::path::Path;

/// Parser for RIS format citations.
///
/// RIS is a standardized format for bibliographic citations that uses two-letter
/// tags at the start of each line to denote different citation fields.
#[derive(Debug, Clone, Default)]
pub struct RisParser {
    encodings: EncodingChain,
}

/// Records decoded from one file, with the encoding that was accepted.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub records: Vec<RisRecord>,
    pub encoding: &'static Encoding,
    /// Non-blank lines that were skipped as malformed.
    pub ignored_lines: usize,
}

impl RisParser {
    /// Creates a new RIS parser instance with the default encoding chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use risstats::ris::RisParser;
    /// let parser = RisParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the encoding chain used by [`RisParser::parse_bytes`].
    #[must_use]
    pub fn with_encodings(mut self, encodings: EncodingChain) -> Self {
        self.encodings = encodings;
        self
    }

    /// The encoding chain tried for raw input.
    pub fn encodings(&self) -> &EncodingChain {
        &self.encodings
    }

    /// Parses already decoded RIS text. Never fails: malformed lines are skipped.
    pub fn parse_str(&self, input: &str) -> Vec<RisRecord> {
        ris_parse(input).records
    }

    /// Decodes and parses raw RIS bytes.
    ///
    /// Returns `None` when no encoding of the chain accepts the input.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Option<ParsedFile> {
        let (text, encoding) = self.encodings.decode(bytes)?;
        let raw = ris_parse(text);
        Some(ParsedFile {
            records: raw.records,
            encoding,
            ignored_lines: raw.ignored_lines,
        })
    }

    /// Reads, decodes and parses a RIS file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] when the file cannot be read and
    /// [`AnalysisError::Decode`] when no encoding of the chain accepts it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedFile> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_bytes(&bytes)
            .ok_or_else(|| AnalysisError::Decode {
                path: path.to_path_buf(),
                tried: self.encodings.names(),
            })
    }
}

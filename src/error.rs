//! Error types for corpus analysis.
//!
//! Only a missing input directory and export failures end a run. File-level
//! problems ([`AnalysisError::Decode`], [`AnalysisError::Io`]) are recorded in
//! the per-file outcomes and the batch moves on.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while reading, parsing or exporting a RIS corpus.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {} with any of: {}", path.display(), tried.join(", "))]
    Decode { path: PathBuf, tried: Vec<String> },

    #[error("input directory {} is not accessible: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("no encodings configured")]
    NoEncodings,

    #[cfg(feature = "csv")]
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let error = AnalysisError::Decode {
            path: PathBuf::from("refs.ris"),
            tried: vec!["UTF-8".to_string(), "windows-1252".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "cannot decode refs.ris with any of: UTF-8, windows-1252"
        );
    }

    #[test]
    fn test_configuration_error_display() {
        assert_eq!(
            AnalysisError::UnknownEncoding("klingon".into()).to_string(),
            "unknown encoding label: klingon"
        );
        assert_eq!(AnalysisError::NoEncodings.to_string(), "no encodings configured");
    }
}

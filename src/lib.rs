//! Descriptive statistics for corpora of RIS bibliographic exports.
//!
//! `risstats` reads every `.ris` file of a directory, splits the exports into
//! records and counts what they contain: item types, authors, years,
//! languages, sources, keywords, and occurrences of a list of target phrases
//! inside keywords and abstracts. The result can be flattened into a single
//! CSV report.
//!
//! # Key Features
//!
//! - **Tolerant parsing**: files are decoded through an encoding fallback chain
//!   (UTF-8, then windows-1252 by default); malformed lines are skipped and
//!   unterminated trailing records are kept.
//! - **Fuzzy keyword matching**: keywords and phrases are compared after
//!   stripping diacritics, case and punctuation.
//! - **Isolated failures**: a file that cannot be read or decoded is reported
//!   and skipped; the rest of the corpus is still analysed.
//!
//! # Basic Usage
//!
//! ```rust
//! use risstats::{aggregate, TargetPhrases};
//! use risstats::ris::RisParser;
//!
//! let input = r#"TY  - JOUR
//! T2  - Journal of Waste
//! AU  - Silva, J.
//! AU  - Costa, M.
//! KW  - Resíduos eletrônicos
//! ER  -"#;
//!
//! let records = RisParser::new().parse_str(input);
//! let result = aggregate(&records, &TargetPhrases::default());
//!
//! assert_eq!(result.sources.get("Journal of Waste"), 1);
//! assert_eq!(result.keywords.get("residuos eletronicos"), 1);
//! assert_eq!(result.phrases_in_keywords.get("resíduos eletrônicos"), 1);
//! ```
//!
//! # Directory Analysis
//!
//! ```no_run
//! use risstats::{analyze_directory, AnalyzerConfig};
//! use risstats::report::{build_rows, export_csv};
//!
//! let config = AnalyzerConfig::new();
//! if let Some(analysis) = analyze_directory("exports/", &config).unwrap() {
//!     for failed in analysis.failures() {
//!         eprintln!("skipped {}", failed.path.display());
//!     }
//!     let rows = build_rows(&analysis.result, config.export_limits());
//!     export_csv(&rows, "exports/estatisticas_completas_ris.csv").unwrap();
//! }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`Result`], wrapping [`AnalysisError`]. Only an
//! inaccessible input directory stops [`analyze_directory`]; per-file errors
//! are collected in [`CorpusAnalysis::files`].

pub mod aggregate;
pub mod classify;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod normalize;
pub mod phrases;
pub mod report;
pub mod ris;

// Reexports
pub use aggregate::{AggregateResult, Aggregator, aggregate};
pub use classify::{classify_source, classify_type};
pub use corpus::{
    AnalyzerConfig, CorpusAnalysis, FileOutcome, FileStatus, analyze_directory, analyze_files,
    discover_ris_files,
};
pub use error::{AnalysisError, Result};
pub use frequency::FrequencyTable;
pub use normalize::normalize_text;
pub use phrases::{PhraseCounts, TargetPhrases, count_target_phrases};
pub use ris::{RisParser, RisRecord};

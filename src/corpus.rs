//! Directory-level analysis of RIS exports.
//!
//! Every `.ris` file of a directory is parsed on its own; a file that cannot be
//! read or decoded is recorded as failed and the run carries on with the rest.

use crate::aggregate::{AggregateResult, Aggregator};
use crate::error::{AnalysisError, Result};
use crate::phrases::TargetPhrases;
use crate::report::ReportLimits;
use crate::ris::RisParser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of the files picked up from the input directory.
pub const RIS_EXTENSION: &str = "ris";

/// Settings for one analysis run.
///
/// # Examples
///
/// ```
/// use risstats::{AnalyzerConfig, TargetPhrases};
/// use risstats::ris::{EncodingChain, RisParser};
///
/// let parser = RisParser::new()
///     .with_encodings(EncodingChain::from_labels(["utf-8", "iso-8859-1"]).unwrap());
/// let config = AnalyzerConfig::new()
///     .with_parser(parser)
///     .with_phrases(TargetPhrases::new(["e-waste", "WEEE"]));
/// assert_eq!(config.phrases().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    parser: RisParser,
    phrases: TargetPhrases,
    display_limits: ReportLimits,
    export_limits: ReportLimits,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parser: RisParser::new(),
            phrases: TargetPhrases::default(),
            display_limits: ReportLimits::display(),
            export_limits: ReportLimits::export(),
        }
    }
}

impl AnalyzerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parser(mut self, parser: RisParser) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_phrases(mut self, phrases: TargetPhrases) -> Self {
        self.phrases = phrases;
        self
    }

    #[must_use]
    pub fn with_display_limits(mut self, limits: ReportLimits) -> Self {
        self.display_limits = limits;
        self
    }

    #[must_use]
    pub fn with_export_limits(mut self, limits: ReportLimits) -> Self {
        self.export_limits = limits;
        self
    }

    pub fn parser(&self) -> &RisParser {
        &self.parser
    }

    pub fn phrases(&self) -> &TargetPhrases {
        &self.phrases
    }

    pub fn display_limits(&self) -> &ReportLimits {
        &self.display_limits
    }

    pub fn export_limits(&self) -> &ReportLimits {
        &self.export_limits
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileStatus {
    Parsed {
        records: usize,
        encoding: &'static str,
        ignored_lines: usize,
    },
    Failed(AnalysisError),
}

/// Outcome of one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self.status, FileStatus::Parsed { .. })
    }
}

/// Result of analysing a directory.
#[derive(Debug)]
pub struct CorpusAnalysis {
    pub files: Vec<FileOutcome>,
    pub result: AggregateResult,
}

impl CorpusAnalysis {
    /// Files that could not be read or decoded.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|outcome| !outcome.is_parsed())
    }
}

/// List the RIS files directly inside `dir`, sorted by path.
///
/// The extension check ignores ASCII case, so `refs.RIS` is included.
///
/// # Errors
///
/// Returns [`AnalysisError::InputDirectory`] if the directory cannot be listed.
pub fn discover_ris_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let directory_error = |source| AnalysisError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(directory_error)? {
        let path = entry.map_err(directory_error)?.path();
        let is_ris = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RIS_EXTENSION));
        if is_ris && path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-RIS entry");
        }
    }

    files.sort();
    Ok(files)
}

/// Parse and aggregate the given files, in order.
///
/// Failures are recorded per file and never abort the run.
pub fn analyze_files<P: AsRef<Path>>(files: &[P], config: &AnalyzerConfig) -> CorpusAnalysis {
    let mut aggregator = Aggregator::new(&config.phrases);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let path = path.as_ref();
        info!(file = %path.display(), "processing");

        let status = match config.parser.parse_file(path) {
            Ok(parsed) => {
                info!(
                    file = %path.display(),
                    records = parsed.records.len(),
                    encoding = parsed.encoding.name(),
                    "records parsed"
                );
                if parsed.ignored_lines > 0 {
                    debug!(file = %path.display(), lines = parsed.ignored_lines, "ignored malformed lines");
                }
                aggregator.extend(&parsed.records);
                FileStatus::Parsed {
                    records: parsed.records.len(),
                    encoding: parsed.encoding.name(),
                    ignored_lines: parsed.ignored_lines,
                }
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipping file");
                FileStatus::Failed(err)
            }
        };

        outcomes.push(FileOutcome {
            path: path.to_path_buf(),
            status,
        });
    }

    info!(
        files = outcomes.len(),
        records = aggregator.total_records(),
        "corpus aggregated"
    );

    CorpusAnalysis {
        files: outcomes,
        result: aggregator.finish(),
    }
}

/// Analyse every RIS file in `dir`.
///
/// Returns `Ok(None)` when the directory holds no RIS file.
///
/// # Errors
///
/// Returns [`AnalysisError::InputDirectory`] if the directory cannot be listed.
/// Problems with individual files are reported in [`CorpusAnalysis::files`].
pub fn analyze_directory<P: AsRef<Path>>(
    dir: P,
    config: &AnalyzerConfig,
) -> Result<Option<CorpusAnalysis>> {
    let dir = dir.as_ref();
    let files = discover_ris_files(dir)?;

    if files.is_empty() {
        warn!(dir = %dir.display(), "no .{RIS_EXTENSION} files found");
        return Ok(None);
    }

    info!(dir = %dir.display(), files = files.len(), "found RIS files");
    Ok(Some(analyze_files(&files, config)))
}

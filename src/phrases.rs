//! Target phrase counting.
//!
//! A run looks for a fixed list of phrases (by default, e-waste synonyms in
//! Portuguese, English and Spanish) inside keyword and abstract text. Both the
//! text and the phrases are compared in normalized form, see
//! [`normalize_text`].

use crate::error::{AnalysisError, Result};
use crate::normalize::normalize_text;
use std::path::Path;

/// Phrases searched by default.
pub const DEFAULT_TARGET_PHRASES: &[&str] = &[
    "lixo eletrônico",
    "resíduo eletrônico",
    "resíduos eletrônicos",
    "resíduos de equipamentos elétricos e eletrônicos",
    "REEE",
    "lixo eletroeletrônico",
    "resíduo eletroeletrônico",
    "resíduos eletroeletrônicos",
    "e-waste",
    "electronic waste",
    "waste electrical and electronic equipment",
    "WEEE",
    "basura electrónica",
    "residuo electrónico",
    "residuos electrónicos",
    "residuos de aparatos eléctricos y electrónicos",
    "REEE",
];

/// An ordered list of distinct target phrases, fixed for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPhrases {
    /// `(phrase as given, normalized phrase)`, in first-seen order.
    phrases: Vec<(String, String)>,
}

impl Default for TargetPhrases {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_PHRASES.iter().copied())
    }
}

impl TargetPhrases {
    /// Create a phrase list. Repeated phrases are kept once, at their first
    /// position.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<(String, String)> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.into();
            if distinct.iter().all(|(existing, _)| *existing != phrase) {
                let normalized = normalize_text(&phrase);
                distinct.push((phrase, normalized));
            }
        }
        Self { phrases: distinct }
    }

    /// Load phrases from a text file: one phrase per line, blank lines and
    /// lines starting with `#` skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// The phrases as given, in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|(phrase, _)| phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Occurrence count of each target phrase, in phrase-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCounts<'p> {
    counts: Vec<(&'p str, usize)>,
}

impl<'p> PhraseCounts<'p> {
    /// Count for `phrase`, if it is one of the target phrases.
    pub fn get(&self, phrase: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(candidate, _)| *candidate == phrase)
            .map(|(_, count)| *count)
    }

    /// All `(phrase, count)` entries, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (&'p str, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Entries with a non-zero count.
    pub fn hits(&self) -> impl Iterator<Item = (&'p str, usize)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count non-overlapping occurrences of each target phrase in `text`.
///
/// Text and phrases are normalized first, so matching ignores case,
/// diacritics and punctuation. A phrase contained in another phrase is counted
/// for both. Empty text yields an empty result.
///
/// # Examples
///
/// ```
/// use risstats::{count_target_phrases, TargetPhrases};
///
/// let phrases = TargetPhrases::new(["e-waste"]);
/// let counts = count_target_phrases("E-waste and e-waste", &phrases);
/// assert_eq!(counts.get("e-waste"), Some(2));
/// ```
pub fn count_target_phrases<'p>(text: &str, phrases: &'p TargetPhrases) -> PhraseCounts<'p> {
    if text.is_empty() {
        return PhraseCounts::default();
    }

    let normalized = normalize_text(text);
    let counts = phrases
        .phrases
        .iter()
        .map(|(phrase, needle)| {
            let count = if needle.is_empty() {
                0
            } else {
                normalized.matches(needle.as_str()).count()
            };
            (phrase.as_str(), count)
        })
        .collect();

    PhraseCounts { counts }
}

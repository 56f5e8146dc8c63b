//! RIS format tags consumed by the analyser.
//!
//! Only the tags the statistics read get their own variant; every other
//! two-letter tag is kept verbatim in [`RisTag::Unknown`].
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

use std::fmt;

/// RIS format tags.
#[allow(clippy::upper_case_acronyms)]
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum RisTag {
    /// TY - Type of reference
    Type,
    /// M3 - Type of work (thesis subtype, e.g. "PhD Thesis")
    TypeOfWork,
    /// T2 - Secondary title (journal title for articles)
    SecondaryTitle,
    /// JO - Journal/Periodical name
    JournalName,
    /// PB - Publisher (institution for theses)
    Publisher,
    /// AU - Author
    Author,
    /// KW - Keywords
    Keywords,
    /// PY - Publication year
    PublicationYear,
    /// LA - Language
    Language,
    /// AB - Abstract
    Abstract,
    /// ER - End of reference
    EndOfReference,
    /// Unknown tag
    Unknown(String),
}

impl RisTag {
    /// Convert a string tag to a RisTag enum.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TY" => RisTag::Type,
            "M3" => RisTag::TypeOfWork,
            "T2" => RisTag::SecondaryTitle,
            "JO" => RisTag::JournalName,
            "PB" => RisTag::Publisher,
            "AU" => RisTag::Author,
            "KW" => RisTag::Keywords,
            "PY" => RisTag::PublicationYear,
            "LA" => RisTag::Language,
            "AB" => RisTag::Abstract,
            "ER" => RisTag::EndOfReference,
            _ => RisTag::Unknown(tag.to_string()),
        }
    }

    /// Convert a RisTag enum back to its string representation.
    pub fn as_tag(&self) -> &str {
        match self {
            RisTag::Type => "TY",
            RisTag::TypeOfWork => "M3",
            RisTag::SecondaryTitle => "T2",
            RisTag::JournalName => "JO",
            RisTag::Publisher => "PB",
            RisTag::Author => "AU",
            RisTag::Keywords => "KW",
            RisTag::PublicationYear => "PY",
            RisTag::Language => "LA",
            RisTag::Abstract => "AB",
            RisTag::EndOfReference => "ER",
            RisTag::Unknown(tag) => tag,
        }
    }

    /// Whether repeated occurrences of this tag accumulate instead of
    /// overwriting each other.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, RisTag::Author | RisTag::Keywords)
    }
}

impl fmt::Display for RisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

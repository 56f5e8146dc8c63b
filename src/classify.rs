//! Item type and source derivation for RIS records.
//!
//! Labels are Portuguese, as in the reports this crate produces.

use crate::ris::{RisRecord, RisTag};

pub const UNKNOWN_TYPE: &str = "Desconhecido";
pub const UNSPECIFIED_THESIS: &str = "Tese não especificada";
pub const UNSPECIFIED_PERIODICAL: &str = "Periódico não especificado";
pub const UNSPECIFIED_INSTITUTION: &str = "Universidade não especificada";
pub const UNSPECIFIED_SOURCE: &str = "Fonte não especificada";

const JOURNAL: &str = "JOUR";
const THESIS: &str = "THES";

/// Readable labels for the reference types that get one.
fn type_label(code: &str) -> Option<&'static str> {
    match code {
        JOURNAL => Some("Artigo de Periódico"),
        "BOOK" => Some("Livro"),
        "CHAP" => Some("Capítulo de Livro"),
        "CONF" => Some("Conferência"),
        _ => None,
    }
}

/// Derive the item type of a record.
///
/// Theses are reported by their type of work (M3), e.g. "PhD Thesis", other
/// known codes by a readable label, and unknown codes verbatim.
///
/// # Examples
///
/// ```
/// use risstats::classify_type;
/// use risstats::ris::RisRecord;
///
/// let record = RisRecord::from_fields([("TY", "THES"), ("M3", "PhD Thesis")]);
/// assert_eq!(classify_type(&record), "PhD Thesis");
/// ```
pub fn classify_type(record: &RisRecord) -> String {
    let Some(code) = record.get_str(&RisTag::Type) else {
        return UNKNOWN_TYPE.to_string();
    };

    if code == THESIS {
        return record
            .get_str(&RisTag::TypeOfWork)
            .unwrap_or(UNSPECIFIED_THESIS)
            .to_string();
    }

    type_label(code).unwrap_or(code).to_string()
}

/// Derive the source (journal, institution or publisher) of a record.
pub fn classify_source(record: &RisRecord) -> String {
    let field = |tag: RisTag| record.get_str(&tag);

    let source = match record.get_str(&RisTag::Type) {
        Some(JOURNAL) => field(RisTag::SecondaryTitle)
            .or_else(|| field(RisTag::JournalName))
            .unwrap_or(UNSPECIFIED_PERIODICAL),
        Some(THESIS) => field(RisTag::Publisher).unwrap_or(UNSPECIFIED_INSTITUTION),
        _ => field(RisTag::Publisher)
            .or_else(|| field(RisTag::SecondaryTitle))
            .unwrap_or(UNSPECIFIED_SOURCE),
    };

    source.to_string()
}

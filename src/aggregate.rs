//! Corpus-wide statistics over RIS records.
//!
//! [`Aggregator`] folds records one at a time into a set of
//! [`FrequencyTable`]s; [`Aggregator::finish`] hands them over as an
//! [`AggregateResult`].
//!
//! ```
//! use risstats::{aggregate, TargetPhrases};
//! use risstats::ris::RisParser;
//!
//! let records = RisParser::new().parse_str(
//!     "TY  - JOUR\nAU  - Silva, J.\nKW  - E-waste\nER  -\n",
//! );
//! let result = aggregate(&records, &TargetPhrases::default());
//!
//! assert_eq!(result.total_records, 1);
//! assert_eq!(result.keywords.get("e waste"), 1);
//! assert_eq!(result.phrases_in_keywords.get("e-waste"), 1);
//! ```

use crate::classify::{classify_source, classify_type};
use crate::frequency::FrequencyTable;
use crate::normalize::normalize_text;
use crate::phrases::{TargetPhrases, count_target_phrases};
use crate::ris::{RisRecord, RisTag};
use serde::Serialize;

pub const UNSPECIFIED_YEAR: &str = "Ano não especificado";
pub const UNSPECIFIED_LANGUAGE: &str = "Idioma não especificado";

/// Statistics accumulated over every record of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub total_records: u64,
    /// Item types, see [`classify_type`].
    pub types: FrequencyTable,
    /// Individual AU entries.
    pub authors: FrequencyTable,
    /// Raw PY values.
    pub years: FrequencyTable,
    /// Raw LA values.
    pub languages: FrequencyTable,
    /// Sources, see [`classify_source`].
    pub sources: FrequencyTable,
    /// Normalized KW entries.
    pub keywords: FrequencyTable,
    /// Target phrase occurrences inside KW entries.
    pub phrases_in_keywords: FrequencyTable,
    /// Target phrase occurrences inside abstracts.
    pub phrases_in_abstracts: FrequencyTable,
}

/// Incremental record folder.
#[derive(Debug)]
pub struct Aggregator<'p> {
    phrases: &'p TargetPhrases,
    result: AggregateResult,
}

impl<'p> Aggregator<'p> {
    pub fn new(phrases: &'p TargetPhrases) -> Self {
        Self {
            phrases,
            result: AggregateResult::default(),
        }
    }

    /// Fold one record into the statistics.
    pub fn add(&mut self, record: &RisRecord) {
        let result = &mut self.result;
        result.total_records += 1;

        result.types.increment(&classify_type(record));

        // Repeated authors within one record are each counted.
        for author in record.entries(&RisTag::Author).filter(|a| !a.is_empty()) {
            result.authors.increment(author);
        }

        result.years.increment(
            record
                .get_str(&RisTag::PublicationYear)
                .unwrap_or(UNSPECIFIED_YEAR),
        );
        result.languages.increment(
            record
                .get_str(&RisTag::Language)
                .unwrap_or(UNSPECIFIED_LANGUAGE),
        );

        result.sources.increment(&classify_source(record));

        for keyword in record.entries(&RisTag::Keywords).filter(|k| !k.is_empty()) {
            result.keywords.increment(&normalize_text(keyword));
            for (phrase, count) in count_target_phrases(keyword, self.phrases).hits() {
                result.phrases_in_keywords.add(phrase, count as u64);
            }
        }

        if let Some(abstract_text) = record.get_str(&RisTag::Abstract) {
            for (phrase, count) in count_target_phrases(abstract_text, self.phrases).hits() {
                result.phrases_in_abstracts.add(phrase, count as u64);
            }
        }
    }

    /// Number of records folded so far.
    pub fn total_records(&self) -> u64 {
        self.result.total_records
    }

    /// Finish the run and return the accumulated statistics.
    pub fn finish(self) -> AggregateResult {
        self.result
    }
}

impl<'p, 'r> Extend<&'r RisRecord> for Aggregator<'p> {
    fn extend<I: IntoIterator<Item = &'r RisRecord>>(&mut self, records: I) {
        for record in records {
            self.add(record);
        }
    }
}

/// Aggregate a batch of records in one call.
pub fn aggregate<'r, I>(records: I, phrases: &TargetPhrases) -> AggregateResult
where
    I: IntoIterator<Item = &'r RisRecord>,
{
    let mut aggregator = Aggregator::new(phrases);
    aggregator.extend(records);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ris::{FieldValue, RisParser};
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Vec<RisRecord> {
        RisParser::new().parse_str(input)
    }

    #[test]
    fn test_authors_are_not_deduplicated_per_record() {
        let records = parse(
            "TY  - JOUR\nAU  - Silva, J.\nAU  - Silva, J.\nAU  - Costa, M.\nAU  -x\nER  -\n",
        );
        let result = aggregate(&records, &TargetPhrases::default());

        assert_eq!(result.authors.get("Silva, J."), 2);
        assert_eq!(result.authors.get("Costa, M."), 1);
        assert_eq!(result.authors.len(), 2);
    }

    #[test]
    fn test_sentinels_for_missing_fields() {
        let records = parse("AU  - Silva, J.\nER  -\n");
        let result = aggregate(&records, &TargetPhrases::default());

        assert_eq!(result.total_records, 1);
        assert_eq!(result.types.get("Desconhecido"), 1);
        assert_eq!(result.years.get(UNSPECIFIED_YEAR), 1);
        assert_eq!(result.languages.get(UNSPECIFIED_LANGUAGE), 1);
        assert_eq!(result.sources.get("Fonte não especificada"), 1);
        assert!(result.keywords.is_empty());
        assert!(result.phrases_in_abstracts.is_empty());
    }

    #[test]
    fn test_full_record() {
        let input = r#"TY  - JOUR
T2  - Journal of Waste
AU  - Silva, J.
PY  - 2020
LA  - English
KW  - E-Waste
KW  - Recycling
KW  - e-waste management
AB  - E-waste is growing. Electronic waste (WEEE) needs policy.
ER  -

TY  - THES
M3  - Dissertação (Mestrado)
PB  - USP
PY  - 2020
KW  - Resíduos eletrônicos
ER  -
"#;
        let result = aggregate(&parse(input), &TargetPhrases::default());

        assert_eq!(result.total_records, 2);
        assert_eq!(
            result.types.most_common(),
            vec![("Artigo de Periódico", 1), ("Dissertação (Mestrado)", 1)]
        );
        assert_eq!(result.years.most_common(), vec![("2020", 2)]);
        assert_eq!(result.languages.get("English"), 1);
        assert_eq!(result.languages.get(UNSPECIFIED_LANGUAGE), 1);
        assert_eq!(result.sources.get("Journal of Waste"), 1);
        assert_eq!(result.sources.get("USP"), 1);

        assert_eq!(result.keywords.get("e waste"), 1);
        assert_eq!(result.keywords.get("e waste management"), 1);
        assert_eq!(result.keywords.get("residuos eletronicos"), 1);

        assert_eq!(result.phrases_in_keywords.get("e-waste"), 2);
        assert_eq!(result.phrases_in_keywords.get("resíduos eletrônicos"), 1);
        assert_eq!(result.phrases_in_keywords.get("WEEE"), 0);

        assert_eq!(result.phrases_in_abstracts.get("e-waste"), 1);
        assert_eq!(result.phrases_in_abstracts.get("electronic waste"), 1);
        assert_eq!(result.phrases_in_abstracts.get("WEEE"), 1);
        assert_eq!(result.phrases_in_abstracts.len(), 3);
    }

    #[test]
    fn test_single_keyword_value_counts_as_one_entry() {
        let mut record = RisRecord::from_fields([("TY", "BOOK")]);
        record.set_field(
            RisTag::Keywords,
            FieldValue::Single("Lixo Eletrônico".to_string()),
        );

        let result = aggregate([&record], &TargetPhrases::default());
        assert_eq!(result.keywords.get("lixo eletronico"), 1);
        assert_eq!(result.phrases_in_keywords.get("lixo eletrônico"), 1);
    }

    #[test]
    fn test_zero_counts_are_not_recorded() {
        let records = parse("TY  - JOUR\nKW  - Circular economy\nAB  - Nothing here.\nER  -");
        let result = aggregate(&records, &TargetPhrases::default());

        assert!(result.phrases_in_keywords.is_empty());
        assert!(result.phrases_in_abstracts.is_empty());
    }

    #[test]
    fn test_custom_phrase_list() {
        let phrases = TargetPhrases::new(["circular economy"]);
        let records = parse("TY  - JOUR\nKW  - Circular Economy\nER  -");
        let result = aggregate(&records, &phrases);

        assert_eq!(result.phrases_in_keywords.most_common(), vec![("circular economy", 1)]);
    }

    #[test]
    fn test_incremental_aggregation() {
        let phrases = TargetPhrases::default();
        let mut aggregator = Aggregator::new(&phrases);
        for record in parse("TY  - JOUR\nER  -\nTY  - BOOK\nER  -") {
            aggregator.add(&record);
        }
        aggregator.extend(&parse("TY  - CHAP\nER  -"));

        assert_eq!(aggregator.total_records(), 3);
        let result = aggregator.finish();
        assert_eq!(result.types.len(), 3);
    }
}

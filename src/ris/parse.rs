//! RIS format parsing implementation.
//!
//! This module handles the low-level splitting of decoded RIS text into
//! records. Parsing is lenient: any line that is neither a field line nor an
//! end-of-record marker is skipped.

use crate::ris::structure::RisRecord;
use crate::ris::tags::RisTag;

/// Line closing the current record.
pub(crate) const END_OF_RECORD: &str = "ER  -";

/// Separator between the two-character tag and the value.
const FIELD_SEPARATOR: &str = "  -";

/// Records split out of one RIS text.
#[derive(Debug, Default)]
pub(crate) struct RawRisText {
    pub(crate) records: Vec<RisRecord>,
    /// Non-blank lines that were neither fields nor record terminators.
    pub(crate) ignored_lines: usize,
}

/// A classified physical line.
#[derive(Debug, PartialEq, Eq)]
enum RisLine<'a> {
    EndOfRecord,
    Field { tag: &'a str, value: &'a str },
    Blank,
    Other,
}

/// Parse the content of a RIS formatted file into records.
pub(crate) fn ris_parse<S: AsRef<str>>(ris_text: S) -> RawRisText {
    let mut parsed = RawRisText::default();
    let mut current = RisRecord::new();

    // `\r\n` yields an extra blank line, which is skipped like any other.
    for line in ris_text.as_ref().split(['\n', '\r']) {
        match classify_line(line.trim()) {
            RisLine::EndOfRecord => {
                if !current.is_empty() {
                    parsed.records.push(std::mem::take(&mut current));
                }
            }
            RisLine::Field { tag, value } => {
                current.add_data(RisTag::from_tag(tag), value.to_string());
            }
            RisLine::Blank => {}
            RisLine::Other => parsed.ignored_lines += 1,
        }
    }

    // A trailing record without `ER  -` is still a record.
    if !current.is_empty() {
        parsed.records.push(current);
    }

    parsed
}

/// Classify a trimmed line.
///
/// A field line is at least six characters long with `"  -"` at character
/// positions 2 to 4. The tag is the first two characters, the value starts at
/// character 6. Positions count characters, not bytes.
fn classify_line(line: &str) -> RisLine<'_> {
    if line.is_empty() {
        return RisLine::Blank;
    }
    if line == END_OF_RECORD {
        return RisLine::EndOfRecord;
    }

    let Some((tag_end, _)) = line.char_indices().nth(2) else {
        return RisLine::Other;
    };
    let (tag, rest) = line.split_at(tag_end);
    let Some(after_separator) = rest.strip_prefix(FIELD_SEPARATOR) else {
        return RisLine::Other;
    };

    // Character 5 is normally the space after the dash.
    let mut value = after_separator.chars();
    if value.next().is_none() {
        return RisLine::Other;
    }

    RisLine::Field {
        tag: tag.trim(),
        value: value.as_str().trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ris::structure::FieldValue;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("TY  - JOUR", RisLine::Field { tag: "TY", value: "JOUR" })]
    #[case("AU  - Silva, J.", RisLine::Field { tag: "AU", value: "Silva, J." })]
    #[case("KW  - resíduos eletrônicos", RisLine::Field { tag: "KW", value: "resíduos eletrônicos" })]
    #[case("AB  -   padded value  ", RisLine::Field { tag: "AB", value: "padded value" })]
    #[case("AU  -xSmith", RisLine::Field { tag: "AU", value: "Smith" })]
    #[case("AU  -x", RisLine::Field { tag: "AU", value: "" })]
    #[case("A   - single letter tag", RisLine::Field { tag: "A", value: "single letter tag" })]
    #[case("ÉT  - accented tag", RisLine::Field { tag: "ÉT", value: "accented tag" })]
    #[case("ER  - trailing", RisLine::Field { tag: "ER", value: "trailing" })]
    #[case("ER  -", RisLine::EndOfRecord)]
    #[case("", RisLine::Blank)]
    #[case("AU  -", RisLine::Other)]
    #[case("TY - JOUR", RisLine::Other)]
    #[case("TY-JOUR", RisLine::Other)]
    #[case("Record #1 of 10", RisLine::Other)]
    #[case("ÉÉ", RisLine::Other)]
    fn test_classify_line(#[case] line: &str, #[case] expected: RisLine) {
        assert_eq!(classify_line(line), expected);
    }

    #[test]
    fn test_parse_simple_record() {
        let input = "TY  - JOUR\nT2  - Journal of Waste\nAU  - Silva, J.\nER  -\n";

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 1);

        let record = &parsed.records[0];
        assert_eq!(record.get_str(&RisTag::Type), Some("JOUR"));
        assert_eq!(record.get_str(&RisTag::SecondaryTitle), Some("Journal of Waste"));
        assert_eq!(
            record.get(&RisTag::Author),
            Some(&FieldValue::Repeated(vec!["Silva, J.".to_string()]))
        );
    }

    #[test]
    fn test_parse_multiple_records() {
        let input = r#"TY  - JOUR
AU  - Silva, J.
ER  -

TY  - BOOK
AU  - Costa, M.
ER  -"#;

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].get_str(&RisTag::Type), Some("JOUR"));
        assert_eq!(parsed.records[1].get_str(&RisTag::Type), Some("BOOK"));
    }

    #[test]
    fn test_unterminated_trailing_record_is_kept() {
        let input = "TY  - JOUR\nER  -\nTY  - THES\nM3  - PhD Thesis";

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].get_str(&RisTag::TypeOfWork), Some("PhD Thesis"));
    }

    #[test]
    fn test_empty_records_are_not_emitted() {
        let input = "ER  -\nER  -\nTY  - CONF\nER  -\nER  -";

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let input = "TY  - JOUR\r\nPY  - 2020\r\nER  -\r\nTY  - BOOK\rPY  - 2021\rER  -\r";

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].get_str(&RisTag::PublicationYear), Some("2020"));
        assert_eq!(parsed.records[1].get_str(&RisTag::PublicationYear), Some("2021"));
        assert_eq!(parsed.ignored_lines, 0);
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let input = r#"Provider: Some Provider
TY  - JOUR
!! - not a field
this is a continuation line
AU  - Silva, J.
ER  -"#;

        let parsed = ris_parse(input);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.ignored_lines, 3);
        assert_eq!(parsed.records[0].len(), 2);
    }

    #[test]
    fn test_repeated_single_tag_last_wins() {
        let parsed = ris_parse("TY  - JOUR\nLA  - en\nLA  - pt\nER  -");
        assert_eq!(parsed.records[0].get_str(&RisTag::Language), Some("pt"));
    }

    #[test]
    fn test_parse_empty_input() {
        let parsed = ris_parse("");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.ignored_lines, 0);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Field,
        End,
        Blank,
        Malformed,
    }

    const SAMPLE_LINES: &[(&str, Kind)] = &[
        ("TY  - JOUR", Kind::Field),
        ("AU  - Silva, J.", Kind::Field),
        ("KW  - e-waste", Kind::Field),
        ("AU  -x", Kind::Field),
        ("  PY  - 2020  ", Kind::Field),
        ("ER  - trailing", Kind::Field),
        ("ER  -", Kind::End),
        ("  ER  -  ", Kind::End),
        ("", Kind::Blank),
        ("   ", Kind::Blank),
        ("garbage line", Kind::Malformed),
        ("AU  -", Kind::Malformed),
        ("TY - JOUR", Kind::Malformed),
    ];

    /// Records expected from a line sequence: every end marker that follows
    /// at least one field closes a record, and fields left after the last
    /// marker form one more.
    fn expected_counts(lines: &[(&str, Kind)]) -> (usize, usize) {
        let mut records = 0;
        let mut open = false;
        for (_, kind) in lines {
            match kind {
                Kind::Field => open = true,
                Kind::End if open => {
                    records += 1;
                    open = false;
                }
                _ => {}
            }
        }
        let malformed = lines.iter().filter(|(_, kind)| *kind == Kind::Malformed).count();
        (records + usize::from(open), malformed)
    }

    proptest::proptest! {
        #[test]
        fn record_count_follows_end_markers(
            lines in proptest::collection::vec(proptest::sample::select(SAMPLE_LINES.to_vec()), 0..40),
            newline in proptest::sample::select(vec!["\n", "\r\n", "\r"]),
        ) {
            let text = lines.iter().map(|(line, _)| *line).collect::<Vec<_>>().join(newline);
            let parsed = ris_parse(&text);
            let (records, malformed) = expected_counts(&lines);

            proptest::prop_assert_eq!(parsed.records.len(), records);
            proptest::prop_assert_eq!(parsed.ignored_lines, malformed);
            proptest::prop_assert!(parsed.records.iter().all(|record| !record.is_empty()));
        }
    }
}

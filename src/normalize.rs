//! Text normalization for fuzzy keyword comparison.
//!
//! Free text is reduced to lowercase ASCII letters, digits and single spaces:
//!
//! 1. Unicode compatibility decomposition (NFKD), dropping combining marks
//! 2. Lowercasing
//! 3. Every character other than `a-z`, `0-9` or whitespace becomes a space
//! 4. Whitespace runs collapse to one space, ends trimmed
//!
//! Latin-script text with diacritics survives as its base letters. Other
//! scripts (Greek, Cyrillic, CJK, ...) have no ASCII base and are dropped
//! entirely.

use itertools::Itertools;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Normalize `text` for comparison.
///
/// # Examples
///
/// ```
/// use risstats::normalize_text;
///
/// assert_eq!(normalize_text("Resíduo Eletrônico!"), "residuo eletronico");
/// assert_eq!(normalize_text("e-waste"), "e waste");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();

    stripped
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("Resíduo Eletrônico!", "residuo eletronico")]
    #[case("Resíduos de Equipamentos Elétricos e Eletrônicos", "residuos de equipamentos eletricos e eletronicos")]
    #[case("Basura electrónica", "basura electronica")]
    #[case("  WEEE  ", "weee")]
    #[case("e-waste", "e waste")]
    #[case("E-Waste;   recycling\t(2020)", "e waste recycling 2020")]
    #[case("ﬁnance", "finance")]
    #[case("Ελληνικά", "")]
    #[case("Ação/gestão", "acao gestao")]
    fn test_normalize_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[test]
    fn test_non_latin_scripts_are_dropped_between_words() {
        assert_eq!(normalize_text("waste 電子 waste"), "waste waste");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once.clone());
        }

        #[test]
        fn normalized_output_is_restricted(s in "\\PC*") {
            let out = normalize_text(&s);
            prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
            prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
            prop_assert!(!out.contains("  "));
        }
    }
}

//! Label frequency counting.

use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A counter from labels to occurrence counts.
///
/// Labels remember the order in which they were first counted, which breaks
/// ties in [`FrequencyTable::most_common`] deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    /// `(label, count)` in first-seen order.
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn increment(&mut self, label: &str) {
        self.add(label, 1);
    }

    /// Count `count` occurrences of `label`.
    pub fn add(&mut self, label: &str, count: u64) {
        match self.index.get(label) {
            Some(&position) => self.entries[position].1 += count,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), count));
            }
        }
    }

    /// Count for `label`, zero when never seen.
    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map_or(0, |&position| self.entries[position].1)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries by descending count, ties in first-seen order.
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .map(|(label, count)| (label.as_str(), *count))
            .collect()
    }

    /// The `n` most common entries, see [`FrequencyTable::most_common`].
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries = self.most_common();
        entries.truncate(n);
        entries
    }

    /// All entries ordered by label.
    pub fn sorted_by_label(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .collect()
    }
}

impl Serialize for FrequencyTable {
    /// Serialized as a list of `[label, count]` pairs, most common first.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.most_common())
    }
}

impl<'a> Extend<&'a str> for FrequencyTable {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, labels: I) {
        for label in labels {
            self.increment(label);
        }
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(labels: I) -> Self {
        let mut table = Self::new();
        table.extend(labels);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts() {
        let table: FrequencyTable = ["a", "b", "a", "c", "a"].into_iter().collect();

        assert_eq!(table.get("a"), 3);
        assert_eq!(table.get("b"), 1);
        assert_eq!(table.get("missing"), 0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_most_common_breaks_ties_by_first_seen() {
        let table: FrequencyTable = ["late", "early", "late", "zeta", "early", "alpha"]
            .into_iter()
            .collect();

        assert_eq!(
            table.most_common(),
            vec![("late", 2), ("early", 2), ("zeta", 1), ("alpha", 1)]
        );
    }

    #[test]
    fn test_top_n() {
        let mut table = FrequencyTable::new();
        table.add("x", 5);
        table.add("y", 7);
        table.add("z", 1);

        assert_eq!(table.top(2), vec![("y", 7), ("x", 5)]);
        assert_eq!(table.top(10).len(), 3);
        assert!(table.top(0).is_empty());
    }

    #[test]
    fn test_sorted_by_label() {
        let table: FrequencyTable = ["2021", "2019", "Ano não especificado", "2019"]
            .into_iter()
            .collect();

        assert_eq!(
            table.sorted_by_label(),
            vec![("2019", 2), ("2021", 1), ("Ano não especificado", 1)]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.most_common().is_empty());
    }
}

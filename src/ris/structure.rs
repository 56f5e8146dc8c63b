//! RIS record data structures.
//!
//! A record maps each tag to a [`FieldValue`]. Whether a tag holds one value
//! or a list is decided once, at parse time, by [`RisTag::is_repeatable`], so
//! consumers never have to guess the shape of a field.

use crate::ris::tags::RisTag;
use std::collections::HashMap;

/// The value stored for one tag in a [`RisRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A non-repeatable tag. Later occurrences replace earlier ones.
    Single(String),
    /// A repeatable tag (AU, KW) in order of appearance, empty entries included.
    Repeated(Vec<String>),
}

impl FieldValue {
    /// Iterate over the entries of this value. A single value is one entry.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Repeated(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

/// One bibliographic record parsed from a RIS file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RisRecord {
    fields: HashMap<RisTag, FieldValue>,
}

impl RisRecord {
    /// Create a new empty record.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(tag, value)` pairs, applying the same rules as the
    /// parser: repeatable tags accumulate, others keep the last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use risstats::ris::{RisRecord, RisTag};
    ///
    /// let record = RisRecord::from_fields([
    ///     ("TY", "JOUR"),
    ///     ("AU", "Silva, J."),
    ///     ("AU", "Costa, M."),
    /// ]);
    /// assert_eq!(record.get_str(&RisTag::Type), Some("JOUR"));
    /// assert_eq!(record.entries(&RisTag::Author).count(), 2);
    /// ```
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::new();
        for (tag, value) in fields {
            record.add_data(RisTag::from_tag(tag), value.to_string());
        }
        record
    }

    /// Add a tag-value pair to the record.
    pub(crate) fn add_data(&mut self, tag: RisTag, value: String) {
        if tag.is_repeatable() {
            if let FieldValue::Repeated(values) = self
                .fields
                .entry(tag)
                .or_insert_with(|| FieldValue::Repeated(Vec::new()))
            {
                values.push(value);
            }
        } else {
            self.fields.insert(tag, FieldValue::Single(value));
        }
    }

    /// Store a value as-is, bypassing the repeatable-tag rules.
    #[cfg(test)]
    pub(crate) fn set_field(&mut self, tag: RisTag, value: FieldValue) {
        self.fields.insert(tag, value);
    }

    /// Get the raw value stored for a tag.
    pub fn get(&self, tag: &RisTag) -> Option<&FieldValue> {
        self.fields.get(tag)
    }

    /// Get the value of a single-valued tag.
    ///
    /// Returns `None` when the tag is absent or holds a list.
    pub fn get_str(&self, tag: &RisTag) -> Option<&str> {
        match self.fields.get(tag) {
            Some(FieldValue::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Iterate over every entry stored for a tag, empty when the tag is absent.
    pub fn entries<'a>(&'a self, tag: &RisTag) -> impl Iterator<Item = &'a str> + use<'a> {
        self.fields.get(tag).into_iter().flat_map(FieldValue::entries)
    }

    /// Number of distinct tags in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values that count as blank after trimming and lowercasing.
pub const BLANK_MARKERS: &[&str] = &["", "none", "nan"];

/// Normalize a key or label for comparison: trimmed and lowercased.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns true if a raw cell value should be treated as missing.
pub fn is_blank(value: &str) -> bool {
    let lower = normalize_key(value);
    BLANK_MARKERS.contains(&lower.as_str())
}

/// Title-case for display: uppercase the first letter of every alphabetic run,
/// lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// One row of the tabular record source.
///
/// Field names are stored normalized so lookups are case-insensitive.
/// A field that is absent from the map is distinct from one holding an
/// empty string, though both count as missing during evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.insert(k.as_ref(), v);
        }
        record
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(normalize_key(field), value.into());
    }

    /// Case-insensitive field lookup.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(&normalize_key(field)).map(|s| s.as_str())
    }

    /// True if the field is absent or holds a blank marker.
    pub fn is_missing(&self, field: &str) -> bool {
        self.get(field).map(is_blank).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_markers() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("None"));
        assert!(is_blank(" NaN "));
        assert!(!is_blank("0"));
        assert!(!is_blank("ok"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("ad hoc withdrawal"), "Ad Hoc Withdrawal");
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_record_lookup_is_case_insensitive() {
        let record = Record::from_pairs([(" Risk Profile ", "low"), ("SIGNATURE", "")]);
        assert_eq!(record.get("risk profile"), Some("low"));
        assert_eq!(record.get("RISK PROFILE"), Some("low"));
        assert!(record.is_missing("signature"));
        assert!(record.is_missing("address"));
        assert!(!record.is_missing("Risk Profile"));
    }
}

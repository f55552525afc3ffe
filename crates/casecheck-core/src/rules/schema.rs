use serde::{Deserialize, Serialize};

use crate::model::normalize_key;

/// Required fields and documents for one report type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Normalized report-type key (trimmed, lowercase).
    pub report_type: String,
    /// Required data fields, in declaration order. Lowercase, trimmed.
    pub fields: Vec<String>,
    /// Required document names, in declaration order. Lowercase, trimmed.
    pub documents: Vec<String>,
}

impl RuleSet {
    pub fn new(report_type: impl Into<String>) -> Self {
        let report_type: String = report_type.into();
        RuleSet {
            report_type: normalize_key(&report_type),
            fields: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Trim and lowercase the key and every entry.
    pub fn normalized(self) -> Self {
        RuleSet {
            report_type: normalize_key(&self.report_type),
            fields: self.fields.iter().map(|f| normalize_key(f)).collect(),
            documents: self.documents.iter().map(|d| normalize_key(d)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.documents.is_empty()
    }
}

/// Which list of a rule set the compiler is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Fields,
    Documents,
}

/// Rule sets keyed by report type, in first-declaration order.
///
/// Each key appears at most once. Tables are small (a handful of report
/// types), so lookups scan the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RuleSet>", into = "Vec<RuleSet>")]
pub struct RuleTable {
    sets: Vec<RuleSet>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the rule set for a report type. The key is normalized first.
    pub fn get(&self, report_type: &str) -> Option<&RuleSet> {
        let key = normalize_key(report_type);
        self.sets.iter().find(|rs| rs.report_type == key)
    }

    /// Rule set for a report type, or an empty one if the type is unknown.
    pub fn get_or_empty(&self, report_type: &str) -> RuleSet {
        self.get(report_type)
            .cloned()
            .unwrap_or_else(|| RuleSet::new(report_type))
    }

    pub fn contains(&self, report_type: &str) -> bool {
        self.get(report_type).is_some()
    }

    /// Insert a rule set, replacing any existing set with the same key in place.
    /// The set is normalized on the way in.
    pub fn insert(&mut self, rule_set: RuleSet) {
        let rule_set = rule_set.normalized();
        match self
            .sets
            .iter_mut()
            .find(|rs| rs.report_type == rule_set.report_type)
        {
            Some(existing) => *existing = rule_set,
            None => self.sets.push(rule_set),
        }
    }

    pub(crate) fn get_mut(&mut self, report_type: &str) -> Option<&mut RuleSet> {
        let key = normalize_key(report_type);
        self.sets.iter_mut().find(|rs| rs.report_type == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl FromIterator<RuleSet> for RuleTable {
    fn from_iter<I: IntoIterator<Item = RuleSet>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for rs in iter {
            table.insert(rs);
        }
        table
    }
}

impl From<Vec<RuleSet>> for RuleTable {
    fn from(sets: Vec<RuleSet>) -> Self {
        sets.into_iter().collect()
    }
}

impl From<RuleTable> for Vec<RuleSet> {
    fn from(table: RuleTable) -> Self {
        table.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_case_set() -> RuleSet {
        RuleSet {
            report_type: " Annual Review ".into(),
            fields: vec!["Risk Profile".into()],
            documents: vec!["ID Proof".into()],
        }
    }

    #[test]
    fn test_insert_normalizes_key_and_entries() {
        let table: RuleTable = [mixed_case_set()].into_iter().collect();
        let rs = table.get("ANNUAL REVIEW").unwrap();
        assert_eq!(rs.report_type, "annual review");
        assert_eq!(rs.fields, vec!["risk profile"]);
        assert_eq!(rs.documents, vec!["id proof"]);
    }

    #[test]
    fn test_insert_replaces_differently_cased_key() {
        let mut table = RuleTable::new();
        table.insert(RuleSet::new("new business"));
        table.insert(RuleSet::new("annual review"));
        table.insert(mixed_case_set());
        assert_eq!(table.len(), 2);
        let keys: Vec<&str> = table.iter().map(|rs| rs.report_type.as_str()).collect();
        assert_eq!(keys, vec!["new business", "annual review"]);
        assert_eq!(table.get("annual review").unwrap().fields, vec!["risk profile"]);
    }

    #[test]
    fn test_get_or_empty_for_unknown_type() {
        let table: RuleTable = [mixed_case_set()].into_iter().collect();
        let rs = table.get_or_empty(" Mortgage ");
        assert_eq!(rs.report_type, "mortgage");
        assert!(rs.is_empty());
        assert_eq!(table.get_or_empty("annual review").fields, vec!["risk profile"]);
    }

    #[test]
    fn test_deserialized_table_is_normalized() {
        let json = r#"[{"report_type": "Annual Review", "fields": ["Signature"], "documents": []}]"#;
        let table: RuleTable = serde_json::from_str(json).unwrap();
        assert!(table.contains("annual review"));
        assert_eq!(table.get("annual review").unwrap().fields, vec!["signature"]);
    }
}

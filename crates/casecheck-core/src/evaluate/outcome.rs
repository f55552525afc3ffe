use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness verdict for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Complete,
    Incomplete,
    /// Tiered policy only: more missing fields than the threshold.
    MissingData,
    /// Report type not in the rule table, under the flagging policy.
    UnrecognizedType,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Complete => "complete",
            Status::Incomplete => "incomplete",
            Status::MissingData => "missing data",
            Status::UnrecognizedType => "unrecognized type",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Complete)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluation of one record against its rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Client name for display (title case, "Unknown" if blank).
    pub client: String,
    /// Normalized report type used for rule lookup.
    pub report_type: String,
    /// Report type for display (title case).
    pub report_type_display: String,
    pub status: Status,
    /// Required fields that were absent or blank, in rule order.
    pub missing_fields: Vec<String>,
    /// Required documents found in the corpus, in rule order.
    pub matched_documents: Vec<String>,
    /// Required documents not found in the corpus, in rule order.
    pub missing_documents: Vec<String>,
}

/// One histogram entry: how many records were missing a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub missing_count: usize,
}

/// Count of records missing each field, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIssueHistogram {
    entries: Vec<FieldIssue>,
}

impl FieldIssueHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, field: &str) {
        match self.entries.iter_mut().find(|e| e.field == field) {
            Some(entry) => entry.missing_count += 1,
            None => self.entries.push(FieldIssue {
                field: field.to_string(),
                missing_count: 1,
            }),
        }
    }

    pub fn count(&self, field: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.missing_count)
            .unwrap_or(0)
    }

    /// Entries sorted by descending count; ties keep first-seen order.
    pub fn sorted(&self) -> Vec<FieldIssue> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        sorted
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldIssue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All per-record results of a run plus the field histogram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub results: Vec<EvaluationResult>,
    pub field_issues: FieldIssueHistogram,
}

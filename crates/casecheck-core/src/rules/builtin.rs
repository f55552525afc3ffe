use serde::{Deserialize, Serialize};

use crate::model::normalize_key;

/// Report-type headers recognized when no custom labels are configured.
pub const REPORT_TYPES: &[&str] = &[
    "annual review",
    "pension transfer",
    "new business",
    "ad hoc withdrawal",
];

/// Marker line opening the required-fields list of a report type.
pub const FIELDS_MARKER: &str = "required data fields";

/// Marker line opening the required-documents list of a report type.
pub const DOCUMENTS_MARKER: &str = "required documents";

/// Labels the rule compiler recognizes as structure rather than content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub report_types: Vec<String>,
    pub fields_marker: String,
    pub documents_marker: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            report_types: REPORT_TYPES.iter().map(|s| s.to_string()).collect(),
            fields_marker: FIELDS_MARKER.to_string(),
            documents_marker: DOCUMENTS_MARKER.to_string(),
        }
    }
}

impl CompilerConfig {
    /// Returns the normalized report-type key if `line` is a report-type header.
    pub fn match_report_type(&self, line: &str) -> Option<String> {
        let norm = normalize_key(line);
        self.report_types
            .iter()
            .any(|t| normalize_key(t) == norm)
            .then_some(norm)
    }

    pub fn is_fields_marker(&self, line: &str) -> bool {
        marker_text(line) == marker_text(&self.fields_marker)
    }

    pub fn is_documents_marker(&self, line: &str) -> bool {
        marker_text(line) == marker_text(&self.documents_marker)
    }
}

/// Marker comparison ignores a single trailing colon.
fn marker_text(line: &str) -> String {
    let norm = normalize_key(line);
    match norm.strip_suffix(':') {
        Some(stripped) => stripped.trim_end().to_string(),
        None => norm,
    }
}

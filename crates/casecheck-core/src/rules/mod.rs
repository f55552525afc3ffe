pub mod builtin;
pub mod docx;
pub mod schema;

use crate::error::CasecheckError;
use crate::model::normalize_key;
use builtin::CompilerConfig;
use schema::{RuleSet, RuleTable, Section};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Why the compiler dropped a non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The line appeared before any report-type header.
    BeforeReportType,
    /// A report type was active but no fields/documents marker had been seen.
    OutsideSection,
}

/// A non-blank line that did not contribute to the rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    pub text: String,
    pub reason: DropReason,
}

/// Output of a compile: the rule table plus the lines that were ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompiledRules {
    pub table: RuleTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedLine>,
}

/// Compile rule-document lines into a rule table using the built-in labels.
pub fn compile<S: AsRef<str>>(lines: &[S]) -> RuleTable {
    compile_with(lines, &CompilerConfig::default()).table
}

/// Compile rule-document lines into a rule table.
///
/// Single forward pass. A report-type header opens a fresh rule set (a
/// repeated header replaces the earlier set) and clears the section. The
/// fields/documents markers select which list subsequent lines go into.
/// Anything else outside an open section is dropped and reported in
/// `CompiledRules::dropped`. Never fails.
pub fn compile_with<S: AsRef<str>>(lines: &[S], config: &CompilerConfig) -> CompiledRules {
    let mut table = RuleTable::new();
    let mut dropped = Vec::new();
    let mut current_type: Option<String> = None;
    let mut section: Option<Section> = None;

    for (i, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let text = normalize_key(raw);
        if text.is_empty() {
            continue;
        }

        if let Some(key) = config.match_report_type(&text) {
            table.insert(RuleSet::new(key.clone()));
            current_type = Some(key);
            section = None;
            continue;
        }

        let Some(ref key) = current_type else {
            dropped.push(DroppedLine {
                line_number: i + 1,
                text: raw.trim().to_string(),
                reason: DropReason::BeforeReportType,
            });
            continue;
        };

        if config.is_fields_marker(&text) {
            section = Some(Section::Fields);
            continue;
        }
        if config.is_documents_marker(&text) {
            section = Some(Section::Documents);
            continue;
        }

        let (Some(section), Some(rule_set)) = (section, table.get_mut(key)) else {
            dropped.push(DroppedLine {
                line_number: i + 1,
                text: raw.trim().to_string(),
                reason: DropReason::OutsideSection,
            });
            continue;
        };

        match section {
            Section::Fields => rule_set.fields.push(text),
            Section::Documents => rule_set.documents.push(text),
        }
    }

    for line in &dropped {
        tracing::debug!(
            line = line.line_number,
            reason = ?line.reason,
            text = %line.text,
            "rule line ignored"
        );
    }
    tracing::info!(
        report_types = table.len(),
        dropped = dropped.len(),
        "compiled rule document"
    );

    CompiledRules { table, dropped }
}

/// Read the lines of a rule document.
///
/// `.docx` files are read paragraph by paragraph; anything else is treated
/// as UTF-8 text with one block per line.
pub fn read_rule_lines(path: &Path) -> Result<Vec<String>, CasecheckError> {
    let bytes = std::fs::read(path).map_err(|e| CasecheckError::RuleDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let is_docx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("docx"))
        .unwrap_or(false);

    if is_docx {
        docx::docx_lines(&bytes).map_err(|e| CasecheckError::RuleDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    } else {
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(|l| l.to_string())
            .collect())
    }
}

/// Read and compile a rule document from disk.
pub fn load_rules(path: &Path, config: &CompilerConfig) -> Result<CompiledRules, CasecheckError> {
    let lines = read_rule_lines(path)?;
    Ok(compile_with(&lines, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &[&str] = &[
        "Client file checklist",
        "",
        "Annual Review",
        "Required Data Fields:",
        "Risk Profile",
        "  Signature  ",
        "Required Documents:",
        "ID Proof",
        "Pension Transfer",
        "Transfer value",
        "Required Documents:",
        "Transfer Form",
    ];

    #[test]
    fn test_compile_sections() {
        let compiled = compile_with(DOC, &CompilerConfig::default());
        let table = &compiled.table;
        assert_eq!(table.len(), 2);

        let annual = table.get("annual review").unwrap();
        assert_eq!(annual.fields, vec!["risk profile", "signature"]);
        assert_eq!(annual.documents, vec!["id proof"]);

        let transfer = table.get("Pension Transfer").unwrap();
        assert!(transfer.fields.is_empty());
        assert_eq!(transfer.documents, vec!["transfer form"]);
    }

    #[test]
    fn test_dropped_lines_are_reported() {
        let compiled = compile_with(DOC, &CompilerConfig::default());
        assert_eq!(compiled.dropped.len(), 2);
        assert_eq!(compiled.dropped[0].line_number, 1);
        assert_eq!(compiled.dropped[0].reason, DropReason::BeforeReportType);
        // Section resets on a new header, so "Transfer value" has no list.
        assert_eq!(compiled.dropped[1].text, "Transfer value");
        assert_eq!(compiled.dropped[1].reason, DropReason::OutsideSection);
    }

    #[test]
    fn test_repeated_header_replaces_rule_set() {
        let lines = [
            "New Business",
            "Required Data Fields",
            "Income",
            "Annual Review",
            "Required Data Fields",
            "Signature",
            "new business",
            "Required Documents",
            "Fact Find",
        ];
        let table = compile(&lines);
        let nb = table.get("new business").unwrap();
        assert!(nb.fields.is_empty());
        assert_eq!(nb.documents, vec!["fact find"]);
        let order: Vec<&str> = table.iter().map(|rs| rs.report_type.as_str()).collect();
        assert_eq!(order, vec!["new business", "annual review"]);
    }

    #[test]
    fn test_marker_before_header_has_no_effect() {
        let lines = ["Required Data Fields", "Orphan", "Ad Hoc Withdrawal", "Amount"];
        let compiled = compile_with(&lines, &CompilerConfig::default());
        let rs = compiled.table.get("ad hoc withdrawal").unwrap();
        assert!(rs.is_empty());
        assert_eq!(compiled.dropped.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let lines: [&str; 0] = [];
        assert!(compile(&lines).is_empty());
    }

    #[test]
    fn test_read_text_rule_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        std::fs::write(&path, DOC.join("\n")).unwrap();
        let compiled = load_rules(&path, &CompilerConfig::default()).unwrap();
        assert!(compiled.table.contains("annual review"));
    }

    #[test]
    fn test_missing_rule_document_is_error() {
        let err = read_rule_lines(Path::new("/nonexistent/rules.docx")).unwrap_err();
        assert!(matches!(err, CasecheckError::RuleDocument { .. }));
    }
}

pub mod aggregate;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod extraction;
pub mod ingest;
pub mod model;
pub mod rules;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use aggregate::Summary;
use config::{CheckConfig, CheckOptions};
use error::CasecheckError;
use evaluate::{DocumentMatcher, EvaluationResult};
use extraction::pdftotext::PdftotextExtractor;
use extraction::plaintext::PlainTextExtractor;
use extraction::{Corpus, DocumentExtractor, SourceDocument};
use ingest::RecordSet;
use rules::schema::RuleTable;
use rules::DroppedLine;

/// Everything a run produces, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub summary: Summary,
    pub results: Vec<EvaluationResult>,
    /// Extraction outcome per document, with warnings for failures.
    pub corpus: Corpus,
    /// Rule-document lines the compiler ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_rule_lines: Vec<DroppedLine>,
}

/// Main API entry point: check records against a compiled rule table and
/// a set of evidentiary documents.
///
/// Fails only on structural problems (the record source lacks the client or
/// report-type column). Unreadable documents become warnings in the report.
pub fn check(
    records: &RecordSet,
    table: &RuleTable,
    documents: &[SourceDocument],
    extractors: &[&dyn DocumentExtractor],
    options: &CheckOptions,
    matcher: &dyn DocumentMatcher,
) -> Result<CheckReport, CasecheckError> {
    records.require_columns(&[
        options.client_column.as_str(),
        options.report_type_column.as_str(),
    ])?;

    let corpus = extraction::build_corpus(documents, extractors);
    let evaluation = evaluate::evaluate_with(&records.records, table, &corpus, options, matcher);
    let summary = aggregate::aggregate(&evaluation.results, &evaluation.field_issues);

    Ok(CheckReport {
        summary,
        results: evaluation.results,
        corpus,
        ignored_rule_lines: Vec::new(),
    })
}

/// Input files for a full run.
#[derive(Debug, Clone)]
pub struct CheckInputs {
    pub records: PathBuf,
    pub rules: PathBuf,
    pub documents: Vec<PathBuf>,
}

/// Run a full check from files on disk with the built-in extractors
/// (pdftotext for `.pdf`, plain text otherwise) and co-occurrence matching.
pub fn check_files(
    inputs: &CheckInputs,
    config: &CheckConfig,
) -> Result<CheckReport, CasecheckError> {
    let compiled = rules::load_rules(&inputs.rules, &config.rules)?;
    let records = ingest::load_records(&inputs.records)?;

    let mut documents = Vec::with_capacity(inputs.documents.len());
    let mut unreadable = Vec::new();
    for (position, path) in inputs.documents.iter().enumerate() {
        match SourceDocument::read(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => unreadable.push((position, display_name(path), e)),
        }
    }

    let pdf = PdftotextExtractor::new();
    let text = PlainTextExtractor;
    let extractors: [&dyn DocumentExtractor; 2] = [&pdf, &text];

    let mut report = check(
        &records,
        &compiled.table,
        &documents,
        &extractors,
        &config.check,
        &evaluate::CoOccurrenceMatcher,
    )?;

    for (position, name, e) in unreadable {
        tracing::warn!(document = %name, error = %e, "could not open document");
        report.corpus.insert_unreadable(position, name, e.to_string());
    }
    report.ignored_rule_lines = compiled.dropped;

    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

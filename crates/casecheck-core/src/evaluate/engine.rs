use std::collections::HashSet;

use crate::config::CheckOptions;
use crate::evaluate::matching::{CoOccurrenceMatcher, DocumentMatcher};
use crate::evaluate::outcome::{Evaluation, EvaluationResult, FieldIssueHistogram, Status};
use crate::evaluate::status::UnknownTypePolicy;
use crate::extraction::Corpus;
use crate::model::{normalize_key, title_case, Record};
use crate::rules::schema::{RuleSet, RuleTable};

/// Evaluate records against a rule table with the default document matcher.
pub fn evaluate(
    records: &[Record],
    table: &RuleTable,
    corpus: &Corpus,
    options: &CheckOptions,
) -> Evaluation {
    evaluate_with(records, table, corpus, options, &CoOccurrenceMatcher)
}

/// Evaluate records against a rule table.
///
/// Results come back in record order. Data problems are never errors:
/// they show up as missing fields/documents and in the status.
pub fn evaluate_with(
    records: &[Record],
    table: &RuleTable,
    corpus: &Corpus,
    options: &CheckOptions,
    matcher: &dyn DocumentMatcher,
) -> Evaluation {
    let mut field_issues = FieldIssueHistogram::new();
    let results: Vec<EvaluationResult> = records
        .iter()
        .map(|record| evaluate_record(record, table, corpus, options, matcher, &mut field_issues))
        .collect();

    tracing::info!(
        records = results.len(),
        complete = results.iter().filter(|r| r.status.is_complete()).count(),
        matcher = matcher.name(),
        "evaluated records"
    );

    Evaluation {
        results,
        field_issues,
    }
}

/// Evaluate one record, adding its missing fields to `field_issues`.
pub fn evaluate_record(
    record: &Record,
    table: &RuleTable,
    corpus: &Corpus,
    options: &CheckOptions,
    matcher: &dyn DocumentMatcher,
    field_issues: &mut FieldIssueHistogram,
) -> EvaluationResult {
    let client = normalize_key(record.get(&options.client_column).unwrap_or(""));
    let report_type = normalize_key(record.get(&options.report_type_column).unwrap_or(""));

    let client_display = if client.is_empty() {
        "Unknown".to_string()
    } else {
        title_case(&client)
    };
    let report_type_display = title_case(&report_type);

    if options.unknown_type == UnknownTypePolicy::Flag && !table.contains(&report_type) {
        tracing::debug!(client = %client, report_type = %report_type, "unrecognized report type");
        return EvaluationResult {
            client: client_display,
            report_type,
            report_type_display,
            status: Status::UnrecognizedType,
            missing_fields: Vec::new(),
            matched_documents: Vec::new(),
            missing_documents: Vec::new(),
        };
    }

    let rule_set = table.get_or_empty(&report_type);

    let missing_fields = find_missing_fields(record, &rule_set);
    for field in &missing_fields {
        field_issues.increment(field);
    }

    let mut matched_documents = Vec::new();
    let mut missing_documents = Vec::new();
    let mut seen = HashSet::new();
    for document in &rule_set.documents {
        if !seen.insert(document) {
            continue;
        }
        if matcher.matches(corpus, document, &client) {
            matched_documents.push(document.clone());
        } else {
            missing_documents.push(document.clone());
        }
    }

    let status = options
        .status_policy
        .derive(missing_fields.len(), missing_documents.len());

    tracing::debug!(
        client = %client,
        report_type = %report_type,
        status = %status,
        missing_fields = missing_fields.len(),
        missing_documents = missing_documents.len(),
        "evaluated record"
    );

    EvaluationResult {
        client: client_display,
        report_type,
        report_type_display,
        status,
        missing_fields,
        matched_documents,
        missing_documents,
    }
}

/// Required fields of `rule_set` that are absent or blank in `record`.
/// A field listed twice in the rules is reported once.
fn find_missing_fields(record: &Record, rule_set: &RuleSet) -> Vec<String> {
    let mut seen = HashSet::new();
    rule_set
        .fields
        .iter()
        .filter(|f| seen.insert(*f))
        .filter(|f| record.is_missing(f))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::status::StatusPolicy;

    fn annual_review_table() -> RuleTable {
        [RuleSet {
            report_type: "annual review".into(),
            fields: vec!["risk profile".into(), "signature".into()],
            documents: vec!["id proof".into()],
        }]
        .into_iter()
        .collect()
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_missing_field_and_document() {
        let table = annual_review_table();
        let records = [record(&[
            ("client name", "Jane Doe"),
            ("report type", "Annual Review"),
            ("risk profile", ""),
            ("signature", "ok"),
        ])];
        let eval = evaluate(&records, &table, &Corpus::default(), &CheckOptions::default());
        let r = &eval.results[0];
        assert_eq!(r.missing_fields, vec!["risk profile"]);
        assert_eq!(r.missing_documents, vec!["id proof"]);
        assert!(r.matched_documents.is_empty());
        assert_eq!(r.status, Status::Incomplete);
        assert_eq!(r.client, "Jane Doe");
        assert_eq!(r.report_type, "annual review");
        assert_eq!(r.report_type_display, "Annual Review");
        assert_eq!(eval.field_issues.count("risk profile"), 1);
    }

    #[test]
    fn test_mixed_case_table_is_matched() {
        let table: RuleTable = [RuleSet {
            report_type: "Annual Review".into(),
            fields: vec!["Signature".into()],
            documents: vec!["ID Proof".into()],
        }]
        .into_iter()
        .collect();
        let records = [record(&[
            ("client name", "Jane Doe"),
            ("report type", "Annual Review"),
        ])];
        let corpus = Corpus::from_texts(&["ID Proof for Jane Doe"]);
        let eval = evaluate(&records, &table, &corpus, &CheckOptions::default());
        let r = &eval.results[0];
        assert_eq!(r.status, Status::Incomplete);
        assert_eq!(r.missing_fields, vec!["signature"]);
        assert_eq!(r.matched_documents, vec!["id proof"]);
        assert!(r.missing_documents.is_empty());
    }

    #[test]
    fn test_unknown_type_is_complete_by_default() {
        let table = annual_review_table();
        let records = [record(&[("client name", "Jane Doe"), ("report type", "Unknown Type")])];
        let eval = evaluate(&records, &table, &Corpus::default(), &CheckOptions::default());
        let r = &eval.results[0];
        assert_eq!(r.status, Status::Complete);
        assert!(r.missing_fields.is_empty());
        assert!(r.missing_documents.is_empty());
    }

    #[test]
    fn test_unknown_type_can_be_flagged() {
        let table = annual_review_table();
        let options = CheckOptions {
            unknown_type: UnknownTypePolicy::Flag,
            ..Default::default()
        };
        let records = [record(&[("client name", "Jane Doe"), ("report type", "Mortgage")])];
        let eval = evaluate(&records, &table, &Corpus::default(), &options);
        assert_eq!(eval.results[0].status, Status::UnrecognizedType);
        assert!(eval.field_issues.is_empty());
    }

    #[test]
    fn test_blank_markers_and_absent_fields() {
        let table = annual_review_table();
        let records = [record(&[
            ("client name", "Jane Doe"),
            ("report type", "annual review"),
            ("Risk Profile", " NaN "),
        ])];
        let corpus = Corpus::from_texts(&["ID PROOF - Jane Doe"]);
        let eval = evaluate(&records, &table, &corpus, &CheckOptions::default());
        let r = &eval.results[0];
        assert_eq!(r.missing_fields, vec!["risk profile", "signature"]);
        assert_eq!(r.matched_documents, vec!["id proof"]);
    }

    #[test]
    fn test_duplicate_rule_entries_counted_once() {
        let table: RuleTable = [RuleSet {
            report_type: "new business".into(),
            fields: vec!["income".into(), "income".into()],
            documents: vec!["fact find".into(), "fact find".into()],
        }]
        .into_iter()
        .collect();
        let records = [record(&[("client name", "A"), ("report type", "new business")])];
        let eval = evaluate(&records, &table, &Corpus::default(), &CheckOptions::default());
        assert_eq!(eval.results[0].missing_fields, vec!["income"]);
        assert_eq!(eval.results[0].missing_documents, vec!["fact find"]);
        assert_eq!(eval.field_issues.count("income"), 1);
    }

    #[test]
    fn test_tiered_policy() {
        let table: RuleTable = [RuleSet {
            report_type: "new business".into(),
            fields: vec!["a".into(), "b".into(), "c".into()],
            documents: vec!["fact find".into()],
        }]
        .into_iter()
        .collect();
        let options = CheckOptions {
            status_policy: StatusPolicy::tiered(),
            ..Default::default()
        };
        let records = [
            record(&[
                ("client name", "x"),
                ("report type", "new business"),
                ("a", "1"),
                ("b", "1"),
                ("c", "1"),
            ]),
            record(&[("client name", "y"), ("report type", "new business"), ("a", "1")]),
            record(&[("client name", "z"), ("report type", "new business")]),
        ];
        let eval = evaluate(&records, &table, &Corpus::default(), &options);
        let statuses: Vec<Status> = eval.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Complete, Status::Incomplete, Status::MissingData]
        );
    }

    #[test]
    fn test_blank_client_displays_unknown() {
        let records = [record(&[("report type", "annual review")])];
        let eval = evaluate(
            &records,
            &RuleTable::new(),
            &Corpus::default(),
            &CheckOptions::default(),
        );
        assert_eq!(eval.results[0].client, "Unknown");
    }

    #[test]
    fn test_custom_columns() {
        let options = CheckOptions {
            client_column: "Customer".into(),
            report_type_column: "Case Type".into(),
            ..Default::default()
        };
        let records = [record(&[("customer", "Jane Doe"), ("case type", "Annual Review")])];
        let eval = evaluate(&records, &annual_review_table(), &Corpus::default(), &options);
        assert_eq!(eval.results[0].missing_fields, vec!["risk profile", "signature"]);
    }

    struct NeverMatches;

    impl DocumentMatcher for NeverMatches {
        fn matches(&self, _: &Corpus, _: &str, _: &str) -> bool {
            false
        }

        fn name(&self) -> &str {
            "never"
        }
    }

    #[test]
    fn test_matcher_is_replaceable() {
        let records = [record(&[
            ("client name", "Jane Doe"),
            ("report type", "annual review"),
            ("risk profile", "low"),
            ("signature", "ok"),
        ])];
        let corpus = Corpus::from_texts(&["id proof jane doe"]);
        let eval = evaluate_with(
            &records,
            &annual_review_table(),
            &corpus,
            &CheckOptions::default(),
            &NeverMatches,
        );
        assert_eq!(eval.results[0].missing_documents, vec!["id proof"]);
        assert_eq!(eval.results[0].status, Status::Incomplete);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::evaluate::outcome::{EvaluationResult, FieldIssue, FieldIssueHistogram, Status};
use crate::model::normalize_key;

/// Status counts for one report type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub report_type: String,
    pub report_type_display: String,
    pub counts: BTreeMap<Status, usize>,
}

impl BreakdownRow {
    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

/// Report type × status pivot. Rows are in first-seen order; `statuses`
/// lists every status that occurs at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub statuses: Vec<Status>,
    pub rows: Vec<BreakdownRow>,
}

impl Breakdown {
    /// Number of results with this report type and status.
    pub fn count(&self, report_type: &str, status: Status) -> usize {
        let key = normalize_key(report_type);
        self.rows
            .iter()
            .find(|r| r.report_type == key)
            .map(|r| r.count(status))
            .unwrap_or(0)
    }
}

/// Aggregate figures for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub complete: usize,
    /// Everything that is not complete.
    pub incomplete: usize,
    pub breakdown: Breakdown,
    /// Field histogram, most frequently missing first.
    pub field_issues: Vec<FieldIssue>,
}

/// Tally evaluation results. Pure function of its inputs.
pub fn aggregate(results: &[EvaluationResult], field_issues: &FieldIssueHistogram) -> Summary {
    let total = results.len();
    let complete = results.iter().filter(|r| r.status.is_complete()).count();

    let mut rows: Vec<BreakdownRow> = Vec::new();
    for result in results {
        let row = match rows.iter().position(|r| r.report_type == result.report_type) {
            Some(idx) => &mut rows[idx],
            None => {
                rows.push(BreakdownRow {
                    report_type: result.report_type.clone(),
                    report_type_display: result.report_type_display.clone(),
                    counts: BTreeMap::new(),
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };
        *row.counts.entry(result.status).or_insert(0) += 1;
    }

    let mut statuses: Vec<Status> = rows
        .iter()
        .flat_map(|r| r.counts.keys().copied())
        .collect();
    statuses.sort();
    statuses.dedup();

    Summary {
        total,
        complete,
        incomplete: total - complete,
        breakdown: Breakdown { statuses, rows },
        field_issues: field_issues.sorted(),
    }
}

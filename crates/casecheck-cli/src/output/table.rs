use casecheck_core::aggregate::{Breakdown, Summary};
use casecheck_core::evaluate::outcome::EvaluationResult;
use casecheck_core::CheckReport;

pub fn print_report(report: &CheckReport, problems_only: bool) {
    print_warnings(report);
    print_summary(&report.summary);
    print_breakdown(&report.summary.breakdown);
    print_field_issues(&report.summary);
    print_results(&report.results, problems_only);
}

fn print_warnings(report: &CheckReport) {
    if report.corpus.warnings.is_empty() {
        return;
    }
    println!("Warnings:");
    for w in &report.corpus.warnings {
        println!("  could not read {}: {}", w.document, w.message);
    }
    println!();
}

fn print_summary(summary: &Summary) {
    println!("=== Summary ===\n");
    println!("  Total cases:  {}", summary.total);
    println!("  Complete:     {}", summary.complete);
    println!("  Incomplete:   {}", summary.incomplete);
    println!();
}

fn print_breakdown(breakdown: &Breakdown) {
    if breakdown.rows.is_empty() {
        return;
    }
    println!("=== Breakdown by report type ===\n");

    let name_width = breakdown
        .rows
        .iter()
        .map(|r| r.report_type_display.chars().count())
        .chain(std::iter::once("Report type".len()))
        .max()
        .unwrap_or(11);
    let col_widths: Vec<usize> = breakdown
        .statuses
        .iter()
        .map(|s| s.label().len().max(5))
        .collect();

    print!("  {:<width$}", "Report type", width = name_width);
    for (status, w) in breakdown.statuses.iter().zip(&col_widths) {
        print!("  {:>width$}", status.label(), width = *w);
    }
    println!();
    println!(
        "  {}",
        "-".repeat(name_width + col_widths.iter().map(|w| w + 2).sum::<usize>())
    );

    for row in &breakdown.rows {
        print!("  {:<width$}", row.report_type_display, width = name_width);
        for (status, w) in breakdown.statuses.iter().zip(&col_widths) {
            print!("  {:>width$}", row.count(*status), width = *w);
        }
        println!();
    }
    println!();
}

fn print_field_issues(summary: &Summary) {
    println!("=== Common missing fields ===\n");
    if summary.field_issues.is_empty() {
        println!("  No missing fields found.\n");
        return;
    }

    let width = summary
        .field_issues
        .iter()
        .map(|i| i.field.chars().count())
        .max()
        .unwrap_or(10);
    for issue in &summary.field_issues {
        println!("  {:<width$}  {:>4}", issue.field, issue.missing_count, width = width);
    }
    println!();
}

fn print_results(results: &[EvaluationResult], problems_only: bool) {
    println!("=== Record details ===\n");

    let shown: Vec<&EvaluationResult> = results
        .iter()
        .filter(|r| !problems_only || !r.status.is_complete())
        .collect();

    if shown.is_empty() {
        println!("  Nothing to show.\n");
        return;
    }

    for r in shown {
        let report_type = if r.report_type_display.is_empty() {
            "no report type"
        } else {
            r.report_type_display.as_str()
        };
        println!(
            "  {} ({}): {}",
            r.client,
            report_type,
            r.status.label().to_uppercase()
        );

        if r.missing_fields.is_empty() {
            println!("    All required fields present.");
        } else {
            println!("    Missing fields:    {}", r.missing_fields.join(", "));
        }
        if !r.matched_documents.is_empty() {
            println!("    Matched documents: {}", r.matched_documents.join(", "));
        }
        if r.missing_documents.is_empty() {
            println!("    All required documents present.");
        } else {
            println!("    Missing documents: {}", r.missing_documents.join(", "));
        }
        println!();
    }
}

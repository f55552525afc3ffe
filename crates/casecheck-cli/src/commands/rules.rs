use casecheck_core::config::{load_config, CheckConfig};
use casecheck_core::error::CasecheckError;
use casecheck_core::rules::builtin::{self, CompilerConfig};
use casecheck_core::rules::{load_rules, DropReason};
use std::path::Path;

use crate::output;

pub fn show(file: &Path, config: Option<&Path>, output_format: &str) -> Result<(), CasecheckError> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => CheckConfig::default(),
    };
    let compiled = load_rules(file, &config.rules)?;

    if output_format == "json" {
        return output::json::print(&compiled);
    }

    if compiled.table.is_empty() {
        println!("No report types found in {}.", file.display());
        println!("Recognized headers: {}", config.rules.report_types.join(", "));
    }

    for rs in compiled.table.iter() {
        println!("=== {} ===\n", casecheck_core::model::title_case(&rs.report_type));

        println!("  Required data fields:");
        print_list(&rs.fields);
        println!("  Required documents:");
        print_list(&rs.documents);
        println!();
    }

    if !compiled.dropped.is_empty() {
        println!("Ignored lines:");
        for line in &compiled.dropped {
            let reason = match line.reason {
                DropReason::BeforeReportType => "before any report type",
                DropReason::OutsideSection => "no fields/documents marker",
            };
            println!("  line {:>4}: {}  ({})", line.line_number, line.text, reason);
        }
    }

    Ok(())
}

fn print_list(items: &[String]) {
    if items.is_empty() {
        println!("    (none)");
    }
    for item in items {
        println!("    - {}", item);
    }
}

pub fn labels() -> Result<(), CasecheckError> {
    let config = CompilerConfig::default();

    println!("Report-type headers:\n");
    for name in builtin::REPORT_TYPES {
        println!("  {}", casecheck_core::model::title_case(name));
    }
    println!();
    println!("Section markers (a trailing colon is optional):\n");
    println!("  {}", casecheck_core::model::title_case(&config.fields_marker));
    println!("  {}", casecheck_core::model::title_case(&config.documents_marker));
    println!();
    print!(
        r#"A rule document is read line by line (one paragraph per line for DOCX).
A report-type header starts a new rule set; a section marker selects
whether the following lines are required fields or required documents.
Headers and markers match case-insensitively. Other text outside a
section is ignored.

Example:

  Annual Review
  Required Data Fields:
  Risk Profile
  Signature
  Required Documents:
  ID Proof

Custom labels can be supplied with a JSON config file:

{{
  "rules": {{
    "report_types": ["annual review", "mortgage review"],
    "fields_marker": "required data fields",
    "documents_marker": "required documents"
  }}
}}
"#
    );
    Ok(())
}

use casecheck_core::error::CasecheckError;
use casecheck_core::extraction::pdftotext::PdftotextExtractor;
use casecheck_core::extraction::plaintext::PlainTextExtractor;
use casecheck_core::extraction::{extract_text, DocumentExtractor, SourceDocument};
use std::path::PathBuf;

pub fn run(files: &[PathBuf], show_text: bool) -> Result<(), CasecheckError> {
    let pdf = PdftotextExtractor::new();
    let text = PlainTextExtractor;
    let extractors: [&dyn DocumentExtractor; 2] = [&pdf, &text];

    let mut failed = 0;
    for path in files {
        let outcome = SourceDocument::read(path).and_then(|doc| extract_text(&doc, &extractors));
        match outcome {
            Ok(extracted) => {
                println!(
                    "  {}  [{}] {} page(s), {} characters",
                    path.display(),
                    extracted.backend,
                    extracted.pages,
                    extracted.text.chars().count()
                );
                if show_text {
                    println!();
                    for line in extracted.text.lines().filter(|l| !l.trim().is_empty()) {
                        println!("    {}", line.trim_end());
                    }
                    println!();
                }
            }
            Err(e) => {
                failed += 1;
                println!("  {}  could not be read: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        println!("\n{} of {} document(s) could not be read.", failed, files.len());
        if !PdftotextExtractor::is_available() {
            println!("pdftotext was not found on PATH; PDF documents need poppler-utils.");
        }
    }

    Ok(())
}

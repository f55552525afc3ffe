use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::CasecheckError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraph text of a Word (.docx) document, one entry per line.
///
/// Each `w:p` paragraph becomes one line. Manual line breaks inside a
/// paragraph split it into several lines; tabs are kept as `\t`.
pub fn docx_lines(bytes: &[u8]) -> Result<Vec<String>, CasecheckError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| CasecheckError::UnsupportedInput(format!("not a DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| CasecheckError::UnsupportedInput(format!("{DOCUMENT_PART} not found: {e}")))?
        .read_to_string(&mut xml)?;

    let paragraphs = document_xml_paragraphs(&xml)?;
    Ok(paragraphs
        .iter()
        .flat_map(|p| p.split('\n').map(|l| l.to_string()))
        .collect())
}

/// Extract paragraph texts from the body XML of a Word document.
///
/// Paragraphs nested inside another one (text boxes) are emitted when they
/// close, before the paragraph that contains them.
fn document_xml_paragraphs(xml: &str) -> Result<Vec<String>, CasecheckError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // One buffer per open `w:p`, innermost last.
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.name().as_ref(), open.last_mut()) {
                (b"w:p", _) => paragraphs.push(String::new()),
                (b"w:tab", Some(current)) => current.push('\t'),
                (b"w:br" | b"w:cr", Some(current)) => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| CasecheckError::UnsupportedInput(format!("bad DOCX text: {e}")))?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CasecheckError::UnsupportedInput(format!(
                    "malformed DOCX XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

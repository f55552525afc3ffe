pub mod pdftotext;
pub mod plaintext;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CasecheckError;

/// Text extracted from a single page of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Trait for document text extraction backends.
pub trait DocumentExtractor: Send + Sync {
    /// Extract text content from document bytes, returning one PageContent per page.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, CasecheckError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;

    /// Whether this backend handles the named document. Defaults to all documents.
    fn supports(&self, _document_name: &str) -> bool {
        true
    }
}

/// An evidentiary document as supplied by the caller, in upload order.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceDocument {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, naming it by its file name.
    pub fn read(path: &std::path::Path) -> Result<Self, CasecheckError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(SourceDocument { name, bytes })
    }
}

/// Per-document extraction outcome, kept for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    pub pages: usize,
    pub characters: usize,
    pub extracted: bool,
}

impl DocumentSummary {
    fn failed(name: String) -> Self {
        DocumentSummary {
            name,
            backend: None,
            pages: 0,
            characters: 0,
            extracted: false,
        }
    }
}

/// A document that could not be read. Its text is treated as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub document: String,
    pub message: String,
}

/// Combined searchable text of all documents in a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(skip)]
    text: String,
    pub documents: Vec<DocumentSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractionWarning>,
}

impl Corpus {
    /// Corpus from already-extracted texts. Texts are lowercased and space-joined.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let text = texts
            .iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Corpus {
            text,
            documents: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substring test against the lowercase corpus. `needle` should already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Record a document that could not even be opened at its upload
    /// position. Call in ascending `position` order.
    pub fn insert_unreadable(&mut self, position: usize, name: String, message: String) {
        let position = position.min(self.documents.len());
        let warning_at = self.documents[..position]
            .iter()
            .filter(|d| !d.extracted)
            .count();
        self.documents.insert(position, DocumentSummary::failed(name.clone()));
        self.warnings.insert(
            warning_at,
            ExtractionWarning {
                document: name,
                message,
            },
        );
    }
}

/// Lowercase text of one document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
    pub backend: String,
}

/// Extract the lowercase text of one document with the first backend that supports it.
pub fn extract_text(
    document: &SourceDocument,
    extractors: &[&dyn DocumentExtractor],
) -> Result<ExtractedText, CasecheckError> {
    let extractor = extractors
        .iter()
        .find(|e| e.supports(&document.name))
        .ok_or_else(|| {
            CasecheckError::UnsupportedInput(format!("no extractor for '{}'", document.name))
        })?;

    let pages = extractor.extract_pages(&document.bytes)?;
    let text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>()
        .to_lowercase();

    Ok(ExtractedText {
        text,
        pages: pages.len(),
        backend: extractor.backend_name().to_string(),
    })
}

/// Extract every document and join the texts into one corpus.
///
/// Documents are extracted in parallel. A failing document becomes a
/// warning and contributes nothing; the remaining texts are joined with a
/// single space in upload order.
pub fn build_corpus(documents: &[SourceDocument], extractors: &[&dyn DocumentExtractor]) -> Corpus {
    let outcomes: Vec<_> = documents
        .par_iter()
        .map(|doc| extract_text(doc, extractors))
        .collect();

    let mut texts = Vec::new();
    let mut summaries = Vec::with_capacity(documents.len());
    let mut warnings = Vec::new();

    for (doc, outcome) in documents.iter().zip(outcomes) {
        match outcome {
            Ok(extracted) => {
                summaries.push(DocumentSummary {
                    name: doc.name.clone(),
                    backend: Some(extracted.backend),
                    pages: extracted.pages,
                    characters: extracted.text.chars().count(),
                    extracted: true,
                });
                texts.push(extracted.text);
            }
            Err(e) => {
                tracing::warn!(document = %doc.name, error = %e, "could not read document");
                summaries.push(DocumentSummary::failed(doc.name.clone()));
                warnings.push(ExtractionWarning {
                    document: doc.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        documents = documents.len(),
        failed = warnings.len(),
        "extracted document text"
    );

    Corpus {
        text: texts.join(" "),
        documents: summaries,
        warnings,
    }
}

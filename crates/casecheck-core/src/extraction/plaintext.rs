use crate::error::CasecheckError;
use crate::extraction::{DocumentExtractor, PageContent};

/// Treats the document bytes as (lossy) UTF-8 text on a single page.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, CasecheckError> {
        Ok(vec![PageContent {
            page_number: 1,
            text: String::from_utf8_lossy(bytes).to_string(),
        }])
    }

    fn backend_name(&self) -> &str {
        "text"
    }
}

use crate::extraction::Corpus;

/// Decides whether a required document is evidenced for a client.
pub trait DocumentMatcher: Send + Sync {
    /// `document` and `client` are normalized (trimmed, lowercase).
    fn matches(&self, corpus: &Corpus, document: &str, client: &str) -> bool;

    fn name(&self) -> &str;
}

/// Matches when the corpus contains the document name and, anywhere, the
/// client name. The two need not be near each other, so a client mentioned
/// in one file and a document title in another still count as a match.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoOccurrenceMatcher;

impl DocumentMatcher for CoOccurrenceMatcher {
    fn matches(&self, corpus: &Corpus, document: &str, client: &str) -> bool {
        corpus.contains(document) && corpus.contains(client)
    }

    fn name(&self) -> &str {
        "co-occurrence"
    }
}

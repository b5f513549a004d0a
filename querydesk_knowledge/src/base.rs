use std::collections::HashSet;

use tracing::debug;

use crate::documents::{Document, default_documents, reference_text};
use crate::error::{KnowledgeError, Result};
use crate::extract::{self, CompiledExtraction, ExtractionRule, default_extraction_rules};
use crate::search::{ScoredDocument, search_knowledge_base};

/// Answer reported when no document scores above zero.
pub const NOT_FOUND: &str = "No relevant documentation found.";

/// Result of a local documentation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub answer: String,
    pub document_id: Option<String>,
    pub score: u32,
}

impl Lookup {
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            answer: NOT_FOUND.to_string(),
            document_id: None,
            score: 0,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.document_id.is_some()
    }
}

/// Immutable document set plus compiled extraction rules.
pub struct KnowledgeBase {
    documents: Vec<Document>,
    rules: Vec<CompiledExtraction>,
}

impl KnowledgeBase {
    pub fn new(documents: Vec<Document>, rules: Vec<ExtractionRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(KnowledgeError::DuplicateDocument(doc.id.clone()));
            }
        }

        Ok(Self {
            rules: extract::compile(rules)?,
            documents,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(default_documents(), default_extraction_rules())
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Highest-scoring document for `query`, ties to the earliest.
    #[must_use]
    pub fn search(&self, query: &str) -> Option<ScoredDocument<'_>> {
        search_knowledge_base(query, &self.documents)
    }

    /// Narrow answer from `document`, or its full content.
    #[must_use]
    pub fn extract_answer(&self, query: &str, document: &Document) -> String {
        extract::extract_answer(query, document, &self.rules)
    }

    /// Search, then extract.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Lookup {
        let Some(hit) = self.search(query) else {
            debug!("No document matched query");
            return Lookup::not_found();
        };

        Lookup {
            answer: self.extract_answer(query, hit.document),
            document_id: Some(hit.document.id.clone()),
            score: hit.score,
        }
    }

    /// Reference text for the completion service's system prompt.
    #[must_use]
    pub fn reference_text(&self) -> String {
        reference_text(&self.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::with_defaults().unwrap()
    }

    #[test]
    fn fat_arrow_lookup() {
        let hit = kb().lookup("What does the author affectionately call the => syntax?");
        assert_eq!(hit.answer, "fat arrow");
        assert_eq!(hit.document_id.as_deref(), Some("fat-arrow"));
        assert!(hit.score > 0);
    }

    #[test]
    fn full_content_when_no_extraction_applies() {
        let kb = kb();
        let hit = kb.lookup("tell me about double negation");
        assert_eq!(hit.document_id.as_deref(), Some("double-bang"));
        assert_eq!(hit.answer, kb.documents()[1].content);
    }

    #[test]
    fn score_counts_keywords_and_words() {
        // "fat arrow" keyword (+2) and the word "arrow" in the content (+1).
        let hit = kb().lookup("Explain the fat arrow");
        assert_eq!(hit.document_id.as_deref(), Some("fat-arrow"));
        assert_eq!(hit.score, 3);
    }

    #[test]
    fn not_found() {
        let hit = kb().lookup("zebra quilt");
        assert!(!hit.is_found());
        assert_eq!(hit.answer, NOT_FOUND);
    }

    #[test]
    fn lookup_is_idempotent() {
        let kb = kb();
        let q = "What lets you walk every child node of a ts.Node?";
        assert_eq!(kb.lookup(q), kb.lookup(q));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let docs = vec![
            Document::new("same", "A", "a", &[]),
            Document::new("same", "B", "b", &[]),
        ];
        assert!(matches!(
            KnowledgeBase::new(docs, Vec::new()),
            Err(KnowledgeError::DuplicateDocument(id)) if id == "same"
        ));
    }
}

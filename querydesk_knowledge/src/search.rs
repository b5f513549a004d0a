//! Keyword-overlap scoring over the document set.

use tracing::debug;

use crate::documents::Document;

/// Points for each document keyword found in the query.
const KEYWORD_WEIGHT: u32 = 2;
/// Points for each long query word found in the document content.
const WORD_WEIGHT: u32 = 1;
/// Query words must be longer than this (in characters) to count.
const MIN_WORD_LEN: usize = 3;

/// A document paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// Score a single document against an already lowercased query.
#[must_use]
pub fn score_document(query_lower: &str, document: &Document) -> u32 {
    let keyword_hits = document
        .keywords
        .iter()
        .filter(|k| query_lower.contains(k.as_str()))
        .count();

    let content = document.content.to_lowercase();
    let word_hits = query_lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > MIN_WORD_LEN && content.contains(w))
        .count();

    let hits = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    hits(keyword_hits)
        .saturating_mul(KEYWORD_WEIGHT)
        .saturating_add(hits(word_hits).saturating_mul(WORD_WEIGHT))
}

/// Return the highest-scoring document, or `None` when nothing scores.
///
/// Ties go to the document listed first.
#[must_use]
pub fn search_knowledge_base<'a>(query: &str, documents: &'a [Document]) -> Option<ScoredDocument<'a>> {
    let query_lower = query.to_lowercase();
    let mut best: Option<ScoredDocument<'a>> = None;

    for document in documents {
        let score = score_document(&query_lower, document);
        debug!("Document {} scored {}", document.id, score);
        if score > best.map_or(0, |b| b.score) {
            best = Some(ScoredDocument { document, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::default_documents;

    #[test]
    fn keyword_outweighs_word_overlap() {
        let doc = Document::new("d", "D", "alpha beta gamma", &["zeta"]);
        assert_eq!(score_document("zeta", &doc), 2);
        assert_eq!(score_document("alpha", &doc), 1);
        assert_eq!(score_document("zeta alpha gamma", &doc), 4);
    }

    #[test]
    fn short_words_are_ignored() {
        let doc = Document::new("d", "D", "the cat sat on the mat", &[]);
        assert_eq!(score_document("the cat sat", &doc), 0);
    }

    #[test]
    fn punctuation_is_trimmed_from_words() {
        let doc = Document::new("d", "D", "a shorthand syntax", &[]);
        assert_eq!(score_document("syntax?", &doc), 1);
    }

    #[test]
    fn single_keyword_selects_its_document() {
        let docs = default_documents();
        for (query, id) in [
            ("double bang", "double-bang"),
            ("trivia", "trivia"),
            ("getchildren", "compiler-api"),
            ("fat arrow", "fat-arrow"),
        ] {
            let hit = search_knowledge_base(query, &docs).unwrap();
            assert_eq!(hit.document.id, id, "{query}");
        }
    }

    #[test]
    fn unrelated_query_finds_nothing() {
        let docs = default_documents();
        assert!(search_knowledge_base("zebra quilt", &docs).is_none());
        assert!(search_knowledge_base("", &docs).is_none());
    }

    #[test]
    fn ties_go_to_first_document() {
        let docs = vec![
            Document::new("first", "First", "nothing here", &["shared"]),
            Document::new("second", "Second", "nothing there", &["shared"]),
        ];
        let hit = search_knowledge_base("shared", &docs).unwrap();
        assert_eq!(hit.document.id, "first");
        assert_eq!(hit.score, 2);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let docs = default_documents();
        let hit = search_knowledge_base("What does TS.NODE expose?", &docs).unwrap();
        assert_eq!(hit.document.id, "compiler-api");
    }
}

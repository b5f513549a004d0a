//! Documentation answers: completion service first, local rules after.

use std::sync::Arc;

use querydesk_core::{ChatMessage, ChatOptions, LlmProvider};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::base::{KnowledgeBase, NOT_FOUND};
use crate::quick::quick_answer;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions about TypeScript \
based on the following documentation. Answer concisely and directly. If the question asks for a \
specific term or phrase, provide ONLY that term.";

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrigin {
    Llm,
    Document,
    QuickRule,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub document_id: Option<String>,
    pub origin: AnswerOrigin,
}

pub struct AnswerService {
    knowledge: KnowledgeBase,
    provider: Option<Arc<dyn LlmProvider>>,
    options: ChatOptions,
    system_prompt: String,
}

impl AnswerService {
    #[must_use]
    pub fn new(knowledge: KnowledgeBase) -> Self {
        let system_prompt = format!(
            "{SYSTEM_PROMPT}\n\nDocumentation:\n{}",
            knowledge.reference_text()
        );
        Self {
            knowledge,
            provider: None,
            options: ChatOptions::default(),
            system_prompt,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn LlmProvider>, options: ChatOptions) -> Self {
        self.provider = Some(provider);
        self.options = options;
        self
    }

    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    #[must_use]
    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer `question`, asking the completion service when one is set.
    ///
    /// Provider failures are logged and answered locally instead.
    pub async fn answer(&self, question: &str) -> Answer {
        let Some(provider) = &self.provider else {
            return self.answer_locally(question);
        };

        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(question),
        ];

        match provider.chat(&messages, &self.options).await {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    warn!("{} returned an empty answer, using local rules", provider.name());
                    return self.answer_locally(question);
                }
                info!("Answered by {}", provider.name());
                Answer {
                    answer: text.to_string(),
                    document_id: None,
                    origin: AnswerOrigin::Llm,
                }
            }
            Err(e) => {
                warn!("{} request failed: {e:#}. Using local rules", provider.name());
                self.answer_locally(question)
            }
        }
    }

    /// Canned answers, then document lookup, then the not-found message.
    ///
    /// A canned answer still carries the id of the best-scoring document.
    #[must_use]
    pub fn answer_locally(&self, question: &str) -> Answer {
        let lookup = self.knowledge.lookup(question);
        if let Some(id) = &lookup.document_id {
            debug!("Local lookup matched {id} with score {}", lookup.score);
        }

        if let Some(answer) = quick_answer(question) {
            return Answer {
                answer: answer.to_string(),
                document_id: lookup.document_id,
                origin: AnswerOrigin::QuickRule,
            };
        }

        if lookup.is_found() {
            return Answer {
                answer: lookup.answer,
                document_id: lookup.document_id,
                origin: AnswerOrigin::Document,
            };
        }

        Answer {
            answer: NOT_FOUND.to_string(),
            document_id: None,
            origin: AnswerOrigin::NotFound,
        }
    }
}

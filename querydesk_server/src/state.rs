use std::sync::Arc;

use querydesk_config::Config;
use querydesk_knowledge::{AnswerService, KnowledgeBase};
use querydesk_providers::OpenAiProvider;
use querydesk_router::PatternRouter;
use tracing::info;

use crate::error::ServerError;

/// Immutable state shared by every request.
pub struct AppState {
    pub router: PatternRouter,
    pub answers: AnswerService,
}

impl AppState {
    #[must_use]
    pub const fn new(router: PatternRouter, answers: AnswerService) -> Self {
        Self { router, answers }
    }

    /// Default tables, with the completion service only when a credential
    /// is configured.
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let router = PatternRouter::with_defaults()?;
        let mut answers = AnswerService::new(KnowledgeBase::with_defaults()?);

        if let Some(api_key) = config.llm.credential() {
            let provider = OpenAiProvider::new(api_key.to_string(), config.llm.timeout())
                .map_err(ServerError::Provider)?
                .with_base_url(config.llm.base_url.clone());
            info!(
                "LLM answers enabled: model={}, base_url={}",
                config.llm.model,
                provider.base_url()
            );
            answers = answers.with_provider(Arc::new(provider), config.llm.chat_options());
        } else {
            info!("No LLM credential configured, answering from local rules");
        }

        Ok(Self::new(router, answers))
    }

    /// Local-only state over the default tables.
    pub fn local() -> Result<Self, ServerError> {
        Ok(Self::new(
            PatternRouter::with_defaults()?,
            AnswerService::new(KnowledgeBase::with_defaults()?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_provider() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(!state.answers.has_provider());
        assert_eq!(state.router.rules().count(), 6);
    }

    #[test]
    fn credential_enables_provider() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-test".to_string());
        let state = AppState::from_config(&config).unwrap();
        assert!(state.answers.has_provider());
    }
}

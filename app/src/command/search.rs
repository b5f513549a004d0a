use querydesk_config::Config;
use querydesk_core::DOCS_SOURCE;
use querydesk_server::{AppState, SearchResponse};
use tracing::info;

/// Input parameters for the Search command strategy.
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Question to answer
    pub question: String,
    /// Skip the completion service even if a credential is configured
    pub local: bool,
}

/// Strategy for answering a documentation question from the command line.
///
/// Prints the same JSON body `/search` would return.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let state = if input.local {
            AppState::local()?
        } else {
            AppState::from_config(&Config::load()?)?
        };

        let answer = state.answers.answer(&input.question).await;
        info!("Answer origin: {:?}", answer.origin);

        let response = SearchResponse {
            answer: answer.answer,
            sources: DOCS_SOURCE,
            document_id: answer.document_id,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        Ok(())
    }
}

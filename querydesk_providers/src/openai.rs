use std::time::Duration;

use async_trait::async_trait;
use querydesk_core::{ChatMessage, ChatOptions, LlmProvider, LlmResponse, Usage};
use reqwest::Client;
use serde_json::json;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating OpenAiProvider (timeout {}s)", timeout.as_secs());
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<LlmResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        parse_completion(&response)
    }
}

/// Pull the first choice's message text and token usage out of a
/// chat-completion response body.
pub fn parse_completion(response: &serde_json::Value) -> anyhow::Result<LlmResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .trim()
        .to_string();

    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
            .unwrap_or(0),
        total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
    });

    Ok(LlmResponse { content, usage })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> anyhow::Result<LlmResponse> {
        let request = json!({
            "model": options.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        info!("Sending request to completion API: model={}", options.model);
        let response = self.try_send(&request).await?;
        match &response.usage {
            Some(usage) => info!("Received response from completion API: {usage}"),
            None => info!("Received response from completion API"),
        }
        Ok(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_and_usage() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "  fat arrow\n"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 3, "total_tokens": 123}
        });
        let parsed = parse_completion(&body).unwrap();
        assert_eq!(parsed.content, "fat arrow");
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.total_tokens, 123);
        assert_eq!(usage.completion_tokens, 3);
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = json!({"choices": []});
        assert!(parse_completion(&body).is_err());
    }

    #[test]
    fn usage_is_optional() {
        let body = json!({"choices": [{"message": {"content": "!!"}}]});
        assert!(parse_completion(&body).unwrap().usage.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let provider = OpenAiProvider::new("k".to_string(), DEFAULT_TIMEOUT)
            .unwrap()
            .with_base_url("http://localhost:8080/v1/".to_string());
        assert_eq!(provider.base_url(), "http://localhost:8080/v1");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let provider = OpenAiProvider::new("k".to_string(), Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:9".to_string());
        let result = provider
            .chat(&[ChatMessage::user("hi")], &ChatOptions::default())
            .await;
        assert!(result.is_err());
    }
}

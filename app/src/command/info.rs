use querydesk_config::{API_KEY_ENV, Config};
use querydesk_knowledge::KnowledgeBase;
use querydesk_router::PatternRouter;

/// Strategy for displaying configuration and loaded tables.
///
/// Outputs:
/// - Server bind address
/// - LLM settings with the API key masked
/// - Routing rules in match order
/// - Document ids
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== querydesk Configuration ===\n");

        println!("Server:");
        println!("  Bind: {}", config.server.bind_addr());
        println!();

        println!("LLM:");
        match config.llm.credential() {
            Some(key) => println!("  API Key: {}", mask_key(key)),
            None => println!("  API Key: (not set, export {API_KEY_ENV} to enable)"),
        }
        println!("  Base URL: {}", config.llm.base_url);
        println!("  Model: {}", config.llm.model);
        println!("  Temperature: {}", config.llm.temperature);
        println!("  Max Tokens: {}", config.llm.max_tokens);
        println!("  Timeout: {}s", config.llm.timeout_secs);
        println!();

        println!("Routing Rules:");
        let router = PatternRouter::with_defaults()?;
        for (i, rule) in router.rules().enumerate() {
            println!("  {}. {} ({})", i + 1, rule.name, rule.params.join(", "));
        }
        println!();

        println!("Documents:");
        let knowledge = KnowledgeBase::with_defaults()?;
        for doc in knowledge.documents() {
            println!("  {} - {}", doc.id, doc.title);
        }

        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_keys_keep_ends() {
        assert_eq!(mask_key("sk-abcdefghijkl"), "sk-a...ijkl");
    }

    #[test]
    fn short_keys_fully_masked() {
        assert_eq!(mask_key("short"), "***");
    }
}

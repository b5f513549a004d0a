use querydesk_core::ChatOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Credential for the completion service.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const HOST_ENV: &str = "QUERYDESK_HOST";
pub const PORT_ENV: &str = "QUERYDESK_PORT";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        8000
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "LlmConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "LlmConfig::default_model")]
    pub model: String,
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "LlmConfig::default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "LlmConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            max_tokens: Self::default_max_tokens(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    const fn default_temperature() -> f32 {
        0.3
    }

    const fn default_max_tokens() -> u32 {
        150
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    /// The configured credential, if any. Blank keys count as absent.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    #[must_use]
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("querydesk"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/querydesk/config.json` if present, otherwise defaults, then
    /// apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            info!("No config file at {}, using defaults", config_path.display());
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (normally the process
    /// environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring {PORT_ENV}={port}: {e}"),
            }
        }
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "server": {
    "host": "0.0.0.0",
    "port": 8000
  },
  "llm": {
    "base_url": "https://api.openai.com/v1",
    "model": "gpt-4o-mini",
    "temperature": 0.3,
    "max_tokens": 150,
    "timeout_secs": 30
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Export {API_KEY_ENV} (or add \"api_key\" under \"llm\") to enable LLM answers");
        println!("   2. Run 'querydesk serve' to start the HTTP server");
        println!();
        Ok(config_path)
    }
}

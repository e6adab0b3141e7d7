//! Anthropic Claude API provider implementation.

use reqwest::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::context;
use crate::error::{BairroError, Result};
use crate::record::Record;

use super::http::{json_headers, ChatEndpoint};
use super::provider::{parse_extracted_records, LlmConfig, LlmProvider};

/// Anthropic API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version.
const API_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider.
pub struct AnthropicProvider {
    endpoint: ChatEndpoint,
    config: LlmConfig,
}

impl AnthropicProvider {
    /// Create a provider for the default Claude model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let mut headers = json_headers(HeaderName::from_static("x-api-key"), &api_key.into())?;
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        Ok(Self {
            endpoint: ChatEndpoint::new("Anthropic", API_URL, headers)?,
            config,
        })
    }

    /// Read the key from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(LlmConfig::default())
    }

    pub fn from_env_with_config(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            BairroError::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Self::with_config(api_key, config)
    }

    /// One-turn Messages API call; the restaurant system prompt rides in `system`.
    fn complete(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": context::system_prompt(),
            "messages": [{ "role": "user", "content": user_prompt }]
        });

        let reply: MessagesReply = self.endpoint.post(&body)?;
        reply
            .first_text()
            .ok_or_else(|| BairroError::Llm("Anthropic reply had no text block".to_string()))
    }
}

impl LlmProvider for AnthropicProvider {
    fn answer_question(&self, question: &str, snippet: &str) -> Result<String> {
        let prompt = context::question_prompt(question, snippet);
        let response = self.complete(&prompt)?;
        Ok(response.trim().to_string())
    }

    fn extract_records(&self, text: &str) -> Result<Vec<Record>> {
        let response = self.complete(&context::extraction_prompt(text))?;
        parse_extracted_records(&response)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    content: Vec<ReplyBlock>,
}

#[derive(Debug, Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl MessagesReply {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find_map(|block| (block.kind == "text").then_some(block.text))
    }
}

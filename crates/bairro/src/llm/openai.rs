//! OpenAI GPT API provider implementation.

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;

use crate::context;
use crate::error::{BairroError, Result};
use crate::record::Record;

use super::http::{json_headers, ChatEndpoint};
use super::provider::{parse_extracted_records, LlmConfig, LlmProvider};

/// OpenAI API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI GPT provider.
pub struct OpenAIProvider {
    endpoint: ChatEndpoint,
    config: LlmConfig,
}

impl OpenAIProvider {
    /// Create a provider for [`DEFAULT_MODEL`].
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let config = LlmConfig {
            model: DEFAULT_MODEL.to_string(),
            ..LlmConfig::default()
        };
        Self::with_config(api_key, config)
    }

    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let bearer = format!("Bearer {}", api_key.into());
        Ok(Self {
            endpoint: ChatEndpoint::new("OpenAI", API_URL, json_headers(AUTHORIZATION, &bearer)?)?,
            config,
        })
    }

    /// Read the key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(api_key_from_env()?)
    }

    pub fn from_env_with_config(config: LlmConfig) -> Result<Self> {
        Self::with_config(api_key_from_env()?, config)
    }

    /// Chat completion with the restaurant system prompt as the first message.
    fn complete(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": context::system_prompt() },
                { "role": "user", "content": user_prompt }
            ]
        });

        let reply: CompletionReply = self.endpoint.post(&body)?;
        reply
            .first_content()
            .ok_or_else(|| BairroError::Llm("OpenAI reply had no message content".to_string()))
    }
}

fn api_key_from_env() -> Result<String> {
    std::env::var("OPENAI_API_KEY").map_err(|_| {
        BairroError::Config("OPENAI_API_KEY environment variable not set".to_string())
    })
}

impl LlmProvider for OpenAIProvider {
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
        "openai"
    }
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionReply {
    fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

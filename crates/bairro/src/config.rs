//! Guide configuration loaded from TOML.
//!
//! ```toml
//! top_k = 5
//! dataset = "data/pinheiros.json"
//!
//! [snippet]
//! max_records = 5
//! max_chars = 4000
//!
//! [llm]
//! provider = "anthropic"
//! model = "claude-sonnet-4-20250514"
//! ```
//!
//! Every key is optional. A missing default config file means defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::SnippetLimits;
use crate::error::{BairroError, Result};
use crate::llm::{AnthropicProvider, LlmConfig, LlmProvider, MockProvider, OpenAIProvider};
use crate::search::DEFAULT_TOP_K;

/// Which language-model provider answers questions and extracts records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    /// No model; `ask` and model imports are unavailable.
    #[default]
    None,
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    Anthropic,
    /// OpenAI GPT API (requires OPENAI_API_KEY)
    OpenAI,
    /// Mock provider for testing
    Mock,
}

impl FromStr for ProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(ProviderChoice::None),
            "anthropic" | "claude" => Ok(ProviderChoice::Anthropic),
            "openai" | "gpt" => Ok(ProviderChoice::OpenAI),
            "mock" | "test" => Ok(ProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, anthropic, openai, or mock.",
                s
            )),
        }
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderChoice::None => write!(f, "none"),
            ProviderChoice::Anthropic => write!(f, "anthropic"),
            ProviderChoice::OpenAI => write!(f, "openai"),
            ProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

/// `[llm]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: ProviderChoice,

    /// Model name; the provider's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl LlmSettings {
    /// Provider configuration with unset keys taken from the provider defaults.
    pub fn llm_config(&self) -> LlmConfig {
        let defaults = LlmConfig::default();
        let default_model = match self.provider {
            ProviderChoice::OpenAI => crate::llm::OPENAI_DEFAULT_MODEL.to_string(),
            ProviderChoice::Mock => "mock".to_string(),
            _ => defaults.model,
        };

        LlmConfig {
            model: self.model.clone().unwrap_or(default_model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        }
    }

    /// Build the configured provider, or `None` when no provider is selected.
    ///
    /// Hosted providers read their API key from the environment.
    pub fn build_provider(&self) -> Result<Option<Arc<dyn LlmProvider>>> {
        let config = self.llm_config();
        let provider: Arc<dyn LlmProvider> = match self.provider {
            ProviderChoice::None => return Ok(None),
            ProviderChoice::Anthropic => Arc::new(AnthropicProvider::from_env_with_config(config)?),
            ProviderChoice::OpenAI => Arc::new(OpenAIProvider::from_env_with_config(config)?),
            ProviderChoice::Mock => Arc::new(MockProvider::with_config(config)),
        };
        debug!(provider = provider.name(), model = %provider.config().model, "built LLM provider");
        Ok(Some(provider))
    }
}

/// Configuration for a [`Guide`](crate::Guide).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Number of recommendations returned by `recommend` and `search`.
    pub top_k: usize,

    /// Dataset used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Bounds on the context handed to the model.
    pub snippet: SnippetLimits,

    pub llm: LlmSettings,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            dataset: None,
            snippet: SnippetLimits::default(),
            llm: LlmSettings::default(),
        }
    }
}

impl GuideConfig {
    /// `<config dir>/bairro/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bairro").join("config.toml"))
    }

    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GuideConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. The file must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| BairroError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file falls back to [`GuideConfig::default`].
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(BairroError::Config("top_k must be at least 1".to_string()));
        }
        if self.snippet.max_records == 0 || self.snippet.max_chars == 0 {
            return Err(BairroError::Config(
                "snippet limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

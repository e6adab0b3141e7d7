//! Language-model providers for conversational answers and text extraction.
//!
//! The model never ranks restaurants. It receives a context snippet that the
//! lexical search already selected, and its extraction output goes through
//! the same merge path as offline imports. Bairro works fully without it.
//!
//! # Supported Providers
//!
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Mock** - deterministic, offline; used in tests
//!
//! # Example
//!
//! ```no_run
//! use bairro::{AnthropicProvider, Guide};
//!
//! let guide = Guide::new().with_llm(AnthropicProvider::from_env().unwrap());
//! ```

mod anthropic;
mod http;
mod mock;
mod openai;
mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use openai::{OpenAIProvider, DEFAULT_MODEL as OPENAI_DEFAULT_MODEL};
pub use provider::{LlmConfig, LlmProvider};

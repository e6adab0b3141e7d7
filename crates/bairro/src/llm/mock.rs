//! Mock LLM provider for testing and offline runs.

use crate::error::Result;
use crate::import::TextBlockParser;
use crate::record::{Record, RecordSource};

use super::provider::{LlmConfig, LlmProvider};

/// Mock LLM provider that returns predictable responses.
///
/// Answers list the restaurants named in the context; extraction runs the
/// offline text-block parser and tags the result as a model import.
pub struct MockProvider {
    config: LlmConfig,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..LlmConfig::default()
            },
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self { config }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn answer_question(&self, question: &str, snippet: &str) -> Result<String> {
        let names: Vec<&str> = snippet
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .map(str::trim)
            .collect();

        if names.is_empty() {
            return Ok(format!(
                "I don't have any restaurant matching \"{}\".",
                question.trim()
            ));
        }

        Ok(format!(
            "For \"{}\" I would try: {}.",
            question.trim(),
            names.join(", ")
        ))
    }

    fn extract_records(&self, text: &str) -> Result<Vec<Record>> {
        Ok(TextBlockParser::new()
            .with_source(RecordSource::ModelImport)
            .parse(text))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

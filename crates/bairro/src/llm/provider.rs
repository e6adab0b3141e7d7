//! LLM provider trait and types.

use crate::error::{BairroError, Result};
use crate::record::{Record, RecordSource};
use crate::store::parse_json_records;

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
        }
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be
/// shared by every request a [`Guide`](crate::Guide) serves.
pub trait LlmProvider: Send + Sync {
    /// Answer a user question from a restaurant context snippet.
    ///
    /// # Arguments
    /// * `question` - The user's question, verbatim
    /// * `snippet` - Output of [`context_snippet`](crate::context::context_snippet)
    fn answer_question(&self, question: &str, snippet: &str) -> Result<String>;

    /// Extract restaurant records from free text.
    ///
    /// Returned records are tagged [`RecordSource::ModelImport`] and go
    /// through the same merge path as offline imports.
    fn extract_records(&self, text: &str) -> Result<Vec<Record>>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

/// Pull the JSON payload out of a model response, handling markdown code blocks.
pub(crate) fn json_payload(response: &str) -> &str {
    if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(response)
    } else if response.contains("```") {
        response
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(response)
    } else {
        response.trim()
    }
}

/// Parse an extraction response into model-imported records.
pub(crate) fn parse_extracted_records(response: &str) -> Result<Vec<Record>> {
    let mut records = parse_json_records(json_payload(response)).map_err(|e| {
        BairroError::Llm(format!("Failed to parse extracted restaurants: {}", e))
    })?;

    for record in &mut records {
        record.source = Some(RecordSource::ModelImport);
    }
    Ok(records)
}

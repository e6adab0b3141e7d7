//! Main Guide struct and public API.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::GuideConfig;
use crate::context::context_snippet;
use crate::error::{BairroError, Result};
use crate::filter::{filter_records, top_k, FilterCriteria, ScoredRecord};
use crate::import::{ImportMode, TextBlockParser};
use crate::llm::LlmProvider;
use crate::merge::MergeReport;
use crate::record::Record;
use crate::search::search_records;
use crate::store::Dataset;

/// A conversational answer and the records it was grounded on.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// The provider's reply.
    pub text: String,
    /// Records handed to the provider, in ranked order.
    pub sources: Vec<ScoredRecord>,
    /// Name of the provider that answered.
    pub provider: String,
}

/// The restaurant guide: retrieval, conversational answers and imports.
///
/// A `Guide` holds no dataset. Callers load a [`Dataset`], pass it to each
/// operation and save it after an import.
pub struct Guide {
    config: GuideConfig,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl Guide {
    /// Create a guide with default configuration and no language model.
    pub fn new() -> Self {
        Self::with_config(GuideConfig::default())
    }

    /// Create a guide with custom configuration.
    pub fn with_config(config: GuideConfig) -> Self {
        Self {
            config,
            llm_provider: None,
        }
    }

    /// Create a guide and the provider its configuration selects.
    pub fn from_config(config: GuideConfig) -> Result<Self> {
        let provider = config.llm.build_provider()?;
        Ok(Self {
            config,
            llm_provider: provider,
        })
    }

    /// Add an LLM provider for conversational answers and model imports.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Arc::new(provider));
        self
    }

    /// Use an already shared LLM provider.
    pub fn with_shared_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    /// Whether a language model is configured.
    pub fn has_llm(&self) -> bool {
        self.llm_provider.is_some()
    }

    /// Structured recommendation: hard filter, score, keep the top results.
    pub fn recommend(&self, dataset: &Dataset, criteria: &FilterCriteria) -> Vec<ScoredRecord> {
        top_k(filter_records(&dataset.records, criteria), self.config.top_k)
    }

    /// Free-text recommendation by lexical overlap.
    pub fn search(&self, dataset: &Dataset, query: &str) -> Vec<ScoredRecord> {
        search_records(&dataset.records, query, self.config.top_k)
    }

    /// Answer a question with the configured language model.
    ///
    /// The records are selected by lexical search and passed to the model
    /// as a bounded context snippet; the model never sees the whole dataset.
    pub fn ask(&self, dataset: &Dataset, question: &str) -> Result<Answer> {
        let provider = self.provider()?;

        if question.trim().is_empty() {
            return Err(BairroError::EmptyData("question is empty".to_string()));
        }

        let limits = &self.config.snippet;
        let sources = search_records(&dataset.records, question, limits.max_records);
        let snippet = context_snippet(sources.iter().map(|s| &s.record), limits);

        info!(
            provider = provider.name(),
            records = sources.len(),
            chars = snippet.chars().count(),
            "asking language model"
        );
        let text = provider.answer_question(question, &snippet)?;

        Ok(Answer {
            text,
            sources,
            provider: provider.name().to_string(),
        })
    }

    /// Import free text into the dataset.
    ///
    /// Offline mode parses `Key: value` blocks; model mode asks the
    /// configured provider to extract records. Either way the records are
    /// merged by name and only fill blank fields.
    pub fn import_text(
        &self,
        dataset: &mut Dataset,
        text: &str,
        mode: ImportMode,
    ) -> Result<MergeReport> {
        let records = self.extract(text, mode)?;
        if records.is_empty() {
            warn!(%mode, "import text produced no restaurants");
        }
        Ok(self.import_records(dataset, records))
    }

    /// Parse free text into records without merging them.
    pub fn extract(&self, text: &str, mode: ImportMode) -> Result<Vec<Record>> {
        match mode {
            ImportMode::Offline => Ok(TextBlockParser::new().parse(text)),
            ImportMode::Model => self.provider()?.extract_records(text),
        }
    }

    /// Merge an already-structured batch into the dataset.
    pub fn import_records(
        &self,
        dataset: &mut Dataset,
        batch: impl IntoIterator<Item = Record>,
    ) -> MergeReport {
        dataset.merge(batch)
    }

    fn provider(&self) -> Result<&Arc<dyn LlmProvider>> {
        self.llm_provider.as_ref().ok_or_else(|| {
            BairroError::Config(
                "no language model configured; set [llm] provider or pass --llm".to_string(),
            )
        })
    }
}

impl Default for Guide {
    fn default() -> Self {
        Self::new()
    }
}

//! Bairro: a neighborhood restaurant guide.
//!
//! Bairro ranks a small, hand-curated set of restaurants for one
//! neighborhood and keeps that set up to date from pasted notes.
//!
//! # Core Principles
//!
//! - **Local ranking**: structured filters and lexical search run in-process
//! - **Grounded answers**: a language model only sees the records retrieval picked
//! - **Fill, never overwrite**: imports only complete blank fields
//!
//! # Example
//!
//! ```no_run
//! use bairro::{Dataset, FilterCriteria, Guide, Requirement};
//!
//! let dataset = Dataset::load("pinheiros_restaurants.json").unwrap();
//! let guide = Guide::new();
//!
//! let criteria = FilterCriteria::new()
//!     .with_cuisines(["japonesa"])
//!     .with_voucher(Requirement::Required);
//!
//! for hit in guide.recommend(&dataset, &criteria) {
//!     println!("{} ({})", hit.name(), hit.score);
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod import;
pub mod llm;
pub mod merge;
pub mod record;
pub mod search;
pub mod store;

mod guide;

pub use config::{GuideConfig, LlmSettings, ProviderChoice};
pub use context::{context_snippet, SnippetLimits};
pub use error::{BairroError, Result};
pub use filter::{filter_records, FilterCriteria, Requirement, ScoredRecord};
pub use guide::{Answer, Guide};
pub use import::{ImportMode, TextBlockParser};
pub use llm::{AnthropicProvider, LlmConfig, LlmProvider, MockProvider, OpenAIProvider};
pub use merge::{merge_records, IgnoreReason, MergeField, MergeReport};
pub use record::{PriceLevel, Record, RecordSource, TriState};
pub use search::search_records;
pub use store::{Dataset, DatasetFormat};

//! Import sources that turn free text into records.
//!
//! Records produced here are handed to the merge engine; it treats offline
//! and model-extracted records the same way.

mod text_block;

use std::fmt;
use std::str::FromStr;

pub use text_block::TextBlockParser;

/// How free text is turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Deterministic `Key: value` block parsing.
    #[default]
    Offline,
    /// Structured extraction by the configured language model.
    Model,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline" | "text" => Ok(ImportMode::Offline),
            "model" | "llm" => Ok(ImportMode::Model),
            _ => Err(format!("Unknown import mode: {}. Use offline or model.", s)),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Offline => write!(f, "offline"),
            ImportMode::Model => write!(f, "model"),
        }
    }
}

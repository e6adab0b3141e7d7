//! Error types for the Bairro library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Bairro operations.
///
/// The filter, search and merge engines never fail; these variants cover
/// dataset I/O, configuration and language-model calls.
#[derive(Debug, Error)]
pub enum BairroError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a dataset line.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error from the CSV library while reading pipe-delimited data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Saving or loading a dataset failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language-model provider error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Empty file or no records to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for Bairro operations.
pub type Result<T> = std::result::Result<T, BairroError>;

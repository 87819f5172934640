//! Error types for SLAM Features

use thiserror::Error;

/// Errors that can occur while building the feature table
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed log line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Lexicon format error in {table}: {reason}")]
    LexiconFormat { table: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Incomplete feature row for '{word}': missing {field}")]
    IncompleteRow { word: String, field: String },

    #[error("No instances found for any track")]
    EmptyInput,
}

impl FeatureError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FeatureError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for FeatureError {
    fn from(e: toml::de::Error) -> Self {
        FeatureError::Config(e.to_string())
    }
}

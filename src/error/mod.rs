//! Error handling for the feature pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for the feature pipeline
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File-level error with the path and what the file was needed for
    #[error("{message}: {} ({purpose})", .path.display())]
    File {
        message: String,
        path: PathBuf,
        purpose: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Error reading or writing delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error parsing a JSON configuration document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An input table lacks a column the pipeline depends on
    #[error("Table '{table}' is missing required column '{column}' in {}", .path.display())]
    MissingColumn {
        table: &'static str,
        column: &'static str,
        path: PathBuf,
    },

    /// A code-list pattern failed to compile
    #[error("Invalid pattern '{pattern}' in code list '{list}': {reason}")]
    InvalidPattern {
        list: String,
        pattern: String,
        reason: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// The patient has no AMI-coded diagnosis to anchor window features
    #[error("No index AMI admission for patient {patient_id}")]
    NoIndexEvent { patient_id: String },
}

impl FeatureError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a file error without an underlying I/O source
    #[must_use]
    pub fn file(message: impl Into<String>, path: impl Into<PathBuf>, purpose: impl Into<String>) -> Self {
        Self::File {
            message: message.into(),
            path: path.into(),
            purpose: purpose.into(),
            source: None,
        }
    }

    /// Whether the error only affects a single patient and should not abort a batch
    #[must_use]
    pub const fn is_patient_scoped(&self) -> bool {
        matches!(self, Self::NoIndexEvent { .. })
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, FeatureError>;

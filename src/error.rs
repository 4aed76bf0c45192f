//! Error types for question extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Extraction errors.
///
/// Only document-level failures surface here. Malformed content inside a
/// readable document (orphan options, stray text) is absorbed by the
/// structure builder and never becomes an error.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("malformed document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },

    #[error("unsupported document type: {}", .path.display())]
    Unsupported { path: PathBuf },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub(crate) fn malformed(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedDocument {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Invalid extraction configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid question pattern {pattern:?}: {source}")]
    QuestionPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid option label alphabet {alphabet:?}: {source}")]
    LabelPattern {
        alphabet: String,
        #[source]
        source: regex::Error,
    },

    #[error("option label alphabet is empty")]
    EmptyLabelAlphabet,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

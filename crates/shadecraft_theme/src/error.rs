use std::path::PathBuf;

use thiserror::Error;

use crate::schema::{join_issues, ValidationIssue};

/// Failure to import a configuration from JSON text.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid theme configuration: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

impl ImportError {
    /// Field-level issues, empty for parse errors
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Parse(_) => &[],
            Self::Invalid(issues) => issues,
        }
    }
}

/// Failure to turn a generated theme into a stored configuration.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("malformed generated theme: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generated theme failed validation: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

/// Failure to read or write persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

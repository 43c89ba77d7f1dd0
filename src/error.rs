//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for answer resolution and migration sessions"
//! @acp:domain engine
//! @acp:layer model

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// @acp:summary "Every failure is fatal to the session that produced it"
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// An active, non-optional question has no answer
    #[error("Missing answer \"{0}\"!")]
    MissingAnswer(String),

    /// An inactive single-branch question has an answer
    #[error("Extraneous answer \"{0}\" given!")]
    ExtraneousAnswer(String),

    /// A question validator rejected its answer; the message is surfaced verbatim
    #[error("{0}")]
    Validation(String),

    /// A migration function could not derive its answer
    #[error("Cannot infer answer \"{question}\": {message}")]
    Inference { question: String, message: String },

    /// A manifest of the migrated project is missing or unreadable
    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ScaffoldError {
    /// Create an inference error for a question
    pub fn inference(question: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inference {
            question: question.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error for a path
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

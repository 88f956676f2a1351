use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-wide error type, consolidating all possible errors into a single enum.
///
/// None of these are fatal to a conversation: the engine substitutes built-in
/// data or a default reply before anything reaches the UI shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., malformed lexicon document).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The lexicon/response document could not be loaded.
    #[error("Lexicon unavailable at {}: {reason}", path.display())]
    LexiconUnavailable { path: PathBuf, reason: String },

    /// Represents unexpected internal errors during response selection.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::LexiconUnavailable { path, reason } => AppError::LexiconUnavailable {
                path: path.clone(),
                reason: reason.clone(),
            },
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(format!("Environment variable error: {}", err))
    }
}

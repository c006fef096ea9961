//! Lexicon Error Types
//!
//! Lexicon-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Lexicon-specific result type alias
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Lexicon-specific error variants
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Difficulty outside 1..=5
    #[error("Invalid difficulty level: {0}")]
    InvalidDifficulty(i32),

    /// Unknown tip category
    #[error("Invalid tip type: {0:?}")]
    InvalidTipType(String),

    /// Word or definition left blank
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LexiconError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LexiconError::InvalidDifficulty(_)
            | LexiconError::InvalidTipType(_)
            | LexiconError::MissingField(_) => ErrorKind::InvalidInput,
            LexiconError::Database(e) => sqlx_error_kind(e),
            LexiconError::Config(_) | LexiconError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            LexiconError::Database(e) => {
                tracing::error!(error = %e, "Lexicon database error");
            }
            LexiconError::Internal(msg) | LexiconError::Config(msg) => {
                tracing::error!(message = %msg, "Lexicon internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Lexicon error");
            }
        }
    }
}

impl From<LexiconError> for AppError {
    fn from(err: LexiconError) -> Self {
        let kind = err.kind();
        let app_err = match &err {
            LexiconError::Database(_) => {
                AppError::new(kind, "Dictionary is temporarily unavailable")
                    .with_action("Please try again later")
            }
            _ => AppError::new(kind, err.to_string()),
        };
        app_err.with_source(err)
    }
}

//! Progress Error Types
//!
//! This module provides progress-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::{ChallengeKey, UserId};

/// Progress-specific result type alias
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Progress-specific error variants
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Empty or malformed user identifier
    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    /// Empty or malformed challenge identifier
    #[error("Invalid challenge id: {0:?}")]
    InvalidChallengeId(String),

    /// No session has been initialized (or it was ended)
    #[error("Progress session not initialized")]
    NotInitialized,

    /// A session for another user is still active
    #[error("Session already active for user {active}, cannot switch to {requested}")]
    SessionUserMismatch { active: UserId, requested: UserId },

    /// The store already holds a completion record for this challenge
    #[error("Challenge {0} already recorded")]
    AlreadyRecorded(ChallengeKey),

    /// Persisting a completion failed and the optimistic update was rolled back
    #[error("Could not record completion of {challenge_id}: {source}")]
    CompletionNotRecorded {
        challenge_id: ChallengeKey,
        #[source]
        source: Box<ProgressError>,
    },

    /// Store could not be reached
    #[error("Progress store unavailable: {0}")]
    StoreUnavailable(String),

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

impl ProgressError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProgressError::InvalidUserId(_) | ProgressError::InvalidChallengeId(_) => {
                ErrorKind::InvalidInput
            }
            ProgressError::NotInitialized | ProgressError::SessionUserMismatch { .. } => {
                ErrorKind::FailedPrecondition
            }
            ProgressError::AlreadyRecorded(_) => ErrorKind::Conflict,
            ProgressError::CompletionNotRecorded { source, .. } => source.kind(),
            ProgressError::StoreUnavailable(_) => ErrorKind::Unavailable,
            ProgressError::Database(e) => sqlx_error_kind(e),
            ProgressError::Config(_) | ProgressError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may simply retry the operation
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ProgressError::Database(e) => {
                tracing::error!(error = %e, "Progress database error");
            }
            ProgressError::Internal(msg) | ProgressError::Config(msg) => {
                tracing::error!(message = %msg, "Progress internal error");
            }
            ProgressError::CompletionNotRecorded { challenge_id, source } => {
                tracing::warn!(challenge_id = %challenge_id, error = %source, "Completion rolled back");
            }
            ProgressError::StoreUnavailable(msg) => {
                tracing::warn!(message = %msg, "Progress store unavailable");
            }
            _ => {
                tracing::debug!(error = %self, "Progress error");
            }
        }
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        let kind = err.kind();
        let app_err = match &err {
            ProgressError::CompletionNotRecorded { challenge_id, .. } => {
                AppError::new(kind, format!("Could not record completion of {challenge_id}"))
                    .with_action("Please retry")
            }
            ProgressError::NotInitialized => {
                AppError::new(kind, err.to_string()).with_action("Please sign in again")
            }
            ProgressError::SessionUserMismatch { .. } => {
                AppError::new(kind, err.to_string()).with_action("Sign out before switching users")
            }
            _ => AppError::new(kind, err.to_string()),
        };
        app_err.with_source(err)
    }
}

//! Domain errors for the docsense document pipeline.

use thiserror::Error;

/// Message surfaced when the external capability fails without a usable message.
pub const GENERIC_EXTERNAL_FAILURE: &str =
    "The document service could not complete the request. Please try again.";

/// Domain-level errors that can occur while processing documents.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No text could be extracted from the image.")]
    EmptyExtraction,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("{0}")]
    ExternalService(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Build an external-service error, falling back to the generic message
    /// when the upstream message is blank.
    pub fn external(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::ExternalService(GENERIC_EXTERNAL_FAILURE.to_string())
        } else {
            Self::ExternalService(message)
        }
    }

    /// Whether a manual retry by the caller could reasonably succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_) | Self::Storage(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

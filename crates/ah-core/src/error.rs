//! # AppError
//!
//! Centralized error handling for the AgriHub ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all ah-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Resource not found (e.g., Farmer, Project, Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., blank name, malformed JSON body)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Resource already exists (e.g., duplicate farmer email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// A third-party service (AI, weather, file host) failed or answered garbage
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// A third-party service answered without a usable result. The message is
    /// meant for the client.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Infrastructure failure inside this process
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        AppError::NotFound(kind.to_string(), id.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }
}

/// A specialized Result type for AgriHub logic.
pub type Result<T> = std::result::Result<T, AppError>;

//! Error handling for the marine weather core
//!
//! The fetch orchestrator recovers from most of these internally (cache or
//! synthetic fallback); callers only see errors for programmer mistakes or
//! when every fallback layer is exhausted.

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    // Input errors
    #[error("Validation error: {0}")]
    Validation(String),

    // External service errors
    #[error("Weather API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API error: {status} - {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("External service error: {0}")]
    ExternalService(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

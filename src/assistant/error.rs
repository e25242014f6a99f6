//! Error types for the assistant

use thiserror::Error;

/// Errors that can occur during assistant operations
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Session not found
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model client error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// External adapter (search/scrape) error
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Validation error (rejected before any external call)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors specific to the model API boundary
#[derive(Debug, Error)]
pub enum ModelError {
    /// API returned a non-success status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication / missing API key
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelError::Timeout
        } else if err.is_connect() {
            ModelError::Network(format!("Connection error: {}", err))
        } else {
            ModelError::Network(err.to_string())
        }
    }
}

/// Errors raised by tool handlers.
///
/// These never escape the registry: dispatch catches them and wraps the
/// message into a structured error value.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Handler rejected its arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Handler name rejected at registration time
    #[error("Invalid tool registration: {0}")]
    InvalidRegistration(String),

    /// Upstream dependency of the handler failed
    #[error("{0}")]
    Upstream(String),
}

/// Errors at the search/scrape API boundaries
#[derive(Debug, Error)]
pub enum AdapterError {
    /// API returned a non-success status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Authentication / missing API key
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        AdapterError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::Serialization(err.to_string())
    }
}

/// Result type alias for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Result type alias for model client operations
pub type ModelResult<T> = Result<T, ModelError>;

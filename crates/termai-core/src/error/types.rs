//! Core error types for termai

use thiserror::Error;

/// Result type alias for termai operations
pub type TermaiResult<T> = Result<T, TermaiError>;

/// Main error type for termai
#[derive(Error, Debug, Clone)]
pub enum TermaiError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// LLM request errors
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
    },

    /// HTTP request errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io { message: String },

    /// Neither provider can serve the request
    #[error("{message}")]
    NoProviderAvailable { message: String },

    /// The fallback provider exceeded its wall-clock budget
    #[error("Gemini fallback timed out after {seconds} seconds")]
    FallbackTimeout { seconds: u64 },

    /// The fallback provider failed with a non-timeout error
    #[error("Gemini fallback failed: {message}")]
    FallbackFailed { message: String },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl TermaiError {
    /// Whether this error means no usable provider exists for the process.
    pub fn is_no_provider(&self) -> bool {
        matches!(self, TermaiError::NoProviderAvailable { .. })
    }
}

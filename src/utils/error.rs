//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use prolly_core::CoreError;
use prolly_llm::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Completion or search provider errors
    #[error("Provider error: {0}")]
    Llm(#[from] LlmError),

    /// Extraction faults (pattern engine)
    #[error("Extraction error: {0}")]
    Core(#[from] CoreError),

    /// The completion was empty or too short to contain outcomes
    #[error("Failed to generate meaningful outcomes")]
    EmptyCompletion,

    /// The completion contained no outcome headers
    #[error("No outcomes were generated")]
    NoOutcomes,
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the same request may succeed if sent again.
    ///
    /// Extraction faults and empty results are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Llm(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Convert AppError to a string suitable for error response bodies
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

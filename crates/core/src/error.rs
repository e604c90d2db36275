//! Core Error Types
//!
//! Defines the foundational error types used across the Prolly workspace.
//! These error types are dependency-free (only thiserror + std) to keep the core
//! crate lightweight.
//!
//! The application crate extends these with variants for upstream providers,
//! configuration files and request-level failures.

use thiserror::Error;

/// Core error type for the Prolly workspace.
///
/// Extraction never fails on malformed text; the only error it can surface is
/// a fault of the pattern engine.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}

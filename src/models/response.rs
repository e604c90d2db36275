//! Request/Response Types
//!
//! Bodies exchanged with callers of the outcome service.

use serde::{Deserialize, Serialize};

pub use prolly_core::OutcomesResponse;

use crate::utils::error::AppError;

/// Error body: `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self::new(err.to_string())
    }
}

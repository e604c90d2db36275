//! HTTP Client Factory
//!
//! Provides a factory function for building the reqwest client shared by the
//! completion and search providers.

use std::time::Duration;

use crate::types::{LlmError, LlmResult};

const USER_AGENT: &str = concat!("Prolly/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` with a request timeout.
///
/// A zero timeout leaves requests unbounded.
pub fn build_http_client(timeout_secs: u64) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().map_err(|e| LlmError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}

//! Prolly LLM
//!
//! Outbound collaborators of the outcome pipeline:
//! - Groq chat completions (OpenAI-compatible API) behind the `LlmProvider` trait
//! - Exa web search behind the `SearchProvider` trait
//!
//! Also includes the HTTP client factory shared by both.

pub mod groq;
pub mod http_client;
pub mod provider;
pub mod search;
pub mod types;

// Re-export main types
pub use groq::GroqProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use search::{allowed_urls, format_search_context, ExaSearchProvider, SearchHit, SearchProvider};
pub use types::*;

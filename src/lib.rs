//! Prolly - Rust Backend Library
//!
//! Generates probability-weighted outcomes for a scenario by grounding a
//! chat-completion prompt in web search results and parsing the completion
//! into structured records.
//! It includes:
//! - Business logic services (`OutcomeService`)
//! - Storage layer (JSON config)
//! - Data models and utilities
//!
//! Extraction lives in `prolly-extract`; providers live in `prolly-llm`.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::response::*;
pub use models::settings::{AppConfig, SearchSettings};
pub use services::OutcomeService;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};

pub use prolly_core::{CodeSnippet, Hyperlink, Outcome};
pub use prolly_extract::extract_outcomes;

//! Data Models

pub mod response;
pub mod settings;

pub use response::{ErrorResponse, OutcomesResponse};
pub use settings::{AppConfig, SearchSettings};

//! Utility modules

pub mod error;
pub mod paths;

pub use error::{AppError, AppResult};

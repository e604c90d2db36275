//! Storage Layer
//!
//! Persistent application state. Only the JSON config file lives here; API
//! keys come from the environment and are never stored.

pub mod config;

pub use config::ConfigService;

//! Prolly Core
//!
//! Foundational error types and the outcome data model shared by the Prolly
//! workspace. This crate has no dependencies on application-level code
//! (HTTP clients, LLM providers, configuration, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `outcome` - Extracted outcome records (`Outcome`, `Hyperlink`, `CodeSnippet`)
//!
//! ## Design Principles
//!
//! 1. **Only serde/thiserror** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod outcome;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Outcome Model ──────────────────────────────────────────────────────
pub use outcome::{probability_total, CodeSnippet, Hyperlink, Outcome, OutcomesResponse};

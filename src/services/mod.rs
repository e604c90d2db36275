//! Business Logic Services

pub mod outcomes;

pub use outcomes::OutcomeService;

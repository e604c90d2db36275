//! Outcome Types
//!
//! Structured records produced by the outcome extractor and serialized into
//! the `{"outcomes": [...]}` response body.

use serde::{Deserialize, Serialize};

/// An anchor tag whose URL was found in the search allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub url: String,
    pub text: String,
}

/// A fenced `[CODE:<language>] ... [/CODE]` block from an outcome body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
}

/// One possible scenario outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Leading numeral of the header line, verbatim (not renumbered)
    pub option_number: u64,
    pub title: String,
    /// Body lines joined with `\n`, trimmed as a whole
    pub description: String,
    /// Percentage from the header's `(NN%)` suffix
    pub probability: f64,
    #[serde(default)]
    pub hyperlinks: Vec<Hyperlink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_snippets: Vec<CodeSnippet>,
}

/// Response body carrying the extracted outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomesResponse {
    pub outcomes: Vec<Outcome>,
}

impl From<Vec<Outcome>> for OutcomesResponse {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }
}

/// Sum of all outcome probabilities.
///
/// Sums are reported as-is; nothing is normalized.
pub fn probability_total(outcomes: &[Outcome]) -> f64 {
    outcomes.iter().map(|o| o.probability).sum()
}

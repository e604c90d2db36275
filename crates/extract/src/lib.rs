//! Prolly Extract
//!
//! Turns a free-form LLM completion describing possible outcomes into ordered
//! [`Outcome`] records.
//!
//! Extraction is a single pass over the completion's lines:
//! - `classify` - pure line classification (`LineClassifier`, `LineKind`)
//! - `accumulator` - the state machine that builds and flushes records
//!   (`OutcomeAccumulator`, `AllowList`)
//! - `prompt` - the prompt that asks the model for the parsed format
//!
//! Malformed text never fails extraction: text before the first header is
//! dropped, unterminated code blocks are kept as-is and header-like lines that
//! do not match are folded into the current description.

pub mod accumulator;
pub mod classify;
pub mod prompt;

pub use accumulator::{AllowList, OutcomeAccumulator};
pub use classify::{Anchor, LineClassifier, LineKind};
pub use prompt::build_outcome_prompt;

use prolly_core::{CoreResult, Outcome};

/// Extract outcome records from `response_text`.
///
/// Hyperlinks are collected only when their URL appears in `allowed_urls`.
/// The only error is an internal fault of the pattern engine.
pub fn extract_outcomes<S: AsRef<str>>(
    response_text: &str,
    allowed_urls: &[S],
) -> CoreResult<Vec<Outcome>> {
    let classifier = LineClassifier::shared()?;
    let mut accumulator = OutcomeAccumulator::new(AllowList::new(allowed_urls));

    for line in response_text.lines() {
        accumulator.push(line, classifier.classify(line));
    }

    let outcomes = accumulator.finish();
    tracing::debug!(
        "[OutcomeExtractor] Extracted {} outcome(s) from {} bytes",
        outcomes.len(),
        response_text.len()
    );
    Ok(outcomes)
}

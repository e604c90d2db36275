//! Outcome Accumulator
//!
//! State machine that folds classified lines into outcome records. A record
//! is opened by a header line and flushed when the next header arrives or
//! the input ends; once flushed it is never revisited.

use std::collections::HashSet;

use prolly_core::{CodeSnippet, Hyperlink, Outcome};

use crate::classify::LineKind;

/// URLs that hyperlinks must match to be collected.
///
/// Empty strings are never members.
#[derive(Debug, Clone, Default)]
pub struct AllowList<'a> {
    urls: HashSet<&'a str>,
}

impl<'a> AllowList<'a> {
    pub fn new<S: AsRef<str>>(urls: &'a [S]) -> Self {
        Self {
            urls: urls
                .iter()
                .map(|u| u.as_ref())
                .filter(|u| !u.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        !url.is_empty() && self.urls.contains(url)
    }
}

/// Outcome under construction.
#[derive(Debug)]
struct PendingOutcome {
    option_number: u64,
    title: String,
    probability: f64,
    description: Vec<String>,
    hyperlinks: Vec<Hyperlink>,
    code_snippets: Vec<CodeSnippet>,
}

impl PendingOutcome {
    fn new(option_number: u64, title: &str, probability: f64) -> Self {
        Self {
            option_number,
            title: title.to_string(),
            probability,
            description: Vec::new(),
            hyperlinks: Vec::new(),
            code_snippets: Vec::new(),
        }
    }

    fn into_outcome(self) -> Outcome {
        Outcome {
            option_number: self.option_number,
            title: self.title,
            description: trim_description(&self.description.join("\n")),
            probability: self.probability,
            hyperlinks: self.hyperlinks,
            code_snippets: self.code_snippets,
        }
    }
}

/// Trim the description block's surrounding whitespace.
///
/// When the block would then start with a digit, the first line keeps its
/// indentation so that a body line such as ` 2. Later (40%)` can never turn
/// into a header when the description is extracted again.
fn trim_description(block: &str) -> String {
    let block = block.trim_end();
    let content = block.trim_start();
    if !content.starts_with(|c: char| c.is_ascii_digit()) {
        return content.to_string();
    }
    let leading = &block[..block.len() - content.len()];
    let line_start = leading.rfind('\n').map_or(0, |i| i + 1);
    block[line_start..].to_string()
}

/// A `[CODE:<language>]` block that has not seen its `[/CODE]` yet.
#[derive(Debug)]
struct OpenFence {
    language: String,
    lines: Vec<String>,
}

impl OpenFence {
    fn into_snippet(self) -> CodeSnippet {
        CodeSnippet {
            language: self.language,
            code: self.lines.join("\n"),
        }
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    BeforeFirstOutcome,
    InDescription(PendingOutcome),
    InCodeBlock(PendingOutcome, OpenFence),
}

/// Folds classified lines into an ordered list of outcomes.
#[derive(Debug)]
pub struct OutcomeAccumulator<'a> {
    allow_list: AllowList<'a>,
    state: ScanState,
    outcomes: Vec<Outcome>,
    discarded_lines: usize,
}

impl<'a> OutcomeAccumulator<'a> {
    pub fn new(allow_list: AllowList<'a>) -> Self {
        Self {
            allow_list,
            state: ScanState::BeforeFirstOutcome,
            outcomes: Vec::new(),
            discarded_lines: 0,
        }
    }

    /// Apply one classified line. `raw` is the line as it appeared in the input.
    pub fn push(&mut self, raw: &str, line: LineKind<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = match (state, line) {
            (
                state,
                LineKind::Header {
                    number,
                    title,
                    probability,
                },
            ) => {
                self.flush(state);
                ScanState::InDescription(PendingOutcome::new(number, title, probability))
            }
            (ScanState::BeforeFirstOutcome, _) => {
                self.discarded_lines += 1;
                ScanState::BeforeFirstOutcome
            }
            (ScanState::InDescription(pending), LineKind::CodeFenceOpen { language }) => {
                ScanState::InCodeBlock(
                    pending,
                    OpenFence {
                        language: language.to_string(),
                        lines: Vec::new(),
                    },
                )
            }
            (ScanState::InDescription(mut pending), LineKind::Hyperlink { anchors, .. }) => {
                for anchor in anchors {
                    if self.allow_list.contains(anchor.url) {
                        pending.hyperlinks.push(Hyperlink {
                            url: anchor.url.to_string(),
                            text: anchor.text.to_string(),
                        });
                    } else {
                        tracing::debug!(
                            "[OutcomeExtractor] Anchor not in allow-list, kept as text: {}",
                            anchor.url
                        );
                    }
                }
                pending.description.push(raw.to_string());
                ScanState::InDescription(pending)
            }
            // Plain text, or a close marker with no block open.
            (ScanState::InDescription(mut pending), _) => {
                pending.description.push(raw.to_string());
                ScanState::InDescription(pending)
            }
            (ScanState::InCodeBlock(mut pending, fence), LineKind::CodeFenceClose) => {
                pending.code_snippets.push(fence.into_snippet());
                ScanState::InDescription(pending)
            }
            (ScanState::InCodeBlock(pending, mut fence), _) => {
                fence.lines.push(raw.to_string());
                ScanState::InCodeBlock(pending, fence)
            }
        };
    }

    /// Flush the open outcome, if any, and return every record in header order.
    pub fn finish(mut self) -> Vec<Outcome> {
        let state = std::mem::take(&mut self.state);
        self.flush(state);
        if self.discarded_lines > 0 {
            tracing::debug!(
                "[OutcomeExtractor] Discarded {} line(s) before the first outcome header",
                self.discarded_lines
            );
        }
        self.outcomes
    }

    fn flush(&mut self, state: ScanState) {
        let pending = match state {
            ScanState::BeforeFirstOutcome => return,
            ScanState::InDescription(pending) => pending,
            ScanState::InCodeBlock(mut pending, fence) => {
                tracing::debug!(
                    "[OutcomeExtractor] Unterminated [CODE:{}] block in outcome {}, keeping {} buffered line(s)",
                    fence.language,
                    pending.option_number,
                    fence.lines.len()
                );
                pending.code_snippets.push(fence.into_snippet());
                pending
            }
        };
        self.outcomes.push(pending.into_outcome());
    }
}

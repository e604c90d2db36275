//! Line Classifier
//!
//! Pure, stateless categorization of a single completion line. Whether a line
//! sits inside an open code block is decided by the accumulator, never here.

use std::sync::OnceLock;

use regex::Regex;

use prolly_core::{CoreError, CoreResult};

/// `N. Title (NN.N%)` occupying the whole line.
const HEADER_PATTERN: &str = r"^([0-9]+)\.\s*(.*?)\s*\(([0-9]+(?:\.[0-9]+)?)%\)\s*$";

/// `<a href="URL">TEXT</a>` anywhere in the line.
const ANCHOR_PATTERN: &str = r#"<a href="(.*?)">(.*?)</a>"#;

/// `[CODE:<language>]` occupying the whole (trimmed) line.
const FENCE_OPEN_PATTERN: &str = r"^\[CODE:([^\]]*)\]$";

const FENCE_CLOSE_MARKER: &str = "[/CODE]";

/// An anchor tag recognized inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor<'a> {
    pub url: &'a str,
    pub text: &'a str,
}

/// The category of one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// Starts a new outcome
    Header {
        number: u64,
        title: &'a str,
        probability: f64,
    },
    CodeFenceOpen {
        language: &'a str,
    },
    CodeFenceClose,
    /// A line carrying at least one anchor tag, in order of appearance
    Hyperlink {
        anchors: Vec<Anchor<'a>>,
        raw: &'a str,
    },
    Plain {
        raw: &'a str,
    },
}

/// Compiled line patterns.
pub struct LineClassifier {
    header: Regex,
    anchor: Regex,
    fence_open: Regex,
}

impl LineClassifier {
    /// Compile the classifier patterns.
    pub fn new() -> CoreResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                CoreError::internal(format!("line pattern failed to compile: {}", e))
            })
        };
        Ok(Self {
            header: compile(HEADER_PATTERN)?,
            anchor: compile(ANCHOR_PATTERN)?,
            fence_open: compile(FENCE_OPEN_PATTERN)?,
        })
    }

    /// Process-wide classifier, compiled on first use.
    pub fn shared() -> CoreResult<&'static LineClassifier> {
        static CLASSIFIER: OnceLock<Result<LineClassifier, String>> = OnceLock::new();
        CLASSIFIER
            .get_or_init(|| Self::new().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|msg| CoreError::internal(msg.clone()))
    }

    /// Categorize one line.
    ///
    /// Fence markers and headers are checked first; only a line that is
    /// neither is scanned for anchors.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();
        if trimmed == FENCE_CLOSE_MARKER {
            return LineKind::CodeFenceClose;
        }
        if let Some(caps) = self.fence_open.captures(trimmed) {
            let language = caps.get(1).map_or("", |m| m.as_str()).trim();
            return LineKind::CodeFenceOpen { language };
        }
        if let Some(header) = self.parse_header(line) {
            return header;
        }

        let anchors: Vec<Anchor<'a>> = self
            .anchor
            .captures_iter(line)
            .filter_map(|caps| {
                Some(Anchor {
                    url: caps.get(1)?.as_str(),
                    text: caps.get(2)?.as_str(),
                })
            })
            .collect();
        if anchors.is_empty() {
            LineKind::Plain { raw: line }
        } else {
            LineKind::Hyperlink { anchors, raw: line }
        }
    }

    fn parse_header<'a>(&self, line: &'a str) -> Option<LineKind<'a>> {
        let caps = self.header.captures(line)?;
        // Values that do not fit a u64 numeral or a finite f64 keep the line as body text.
        let Ok(number) = caps.get(1)?.as_str().parse::<u64>() else {
            tracing::debug!("[OutcomeExtractor] Option number out of range, line kept as text");
            return None;
        };
        let probability = caps
            .get(3)?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite());
        let Some(probability) = probability else {
            tracing::debug!("[OutcomeExtractor] Probability out of range, line kept as text");
            return None;
        };
        Some(LineKind::Header {
            number,
            title: caps.get(2).map_or("", |m| m.as_str()).trim(),
            probability,
        })
    }
}

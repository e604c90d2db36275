//! Outcome Prompt
//!
//! Builds the completion prompt whose answer format the extractor parses:
//! `N. Title (NN%)` headers, anchor tags for sources and optional
//! `[CODE:<language>]` blocks.

/// Build the prompt asking the model for possible outcomes of `query`.
///
/// `search_context` is the rendered list of search hits (titles and URLs)
/// that the model is told to cite.
pub fn build_outcome_prompt(query: &str, search_context: &str) -> String {
    let sources = if search_context.trim().is_empty() {
        "(no sources were found for this scenario)"
    } else {
        search_context
    };

    format!(
        r#"You are an assistant that generates possible outcomes for given actions.
Given the setting and action: '{query}', and considering this additional context:

{sources}

List 4-5 possible outcomes. For each outcome, provide:
1. A short title (3-5 words)
2. A detailed description explaining the outcome, its implications, and any relevant context. Use multiple paragraphs if necessary.
3. The probability of occurring (as a percentage).
4. Reference the provided URLs where appropriate using HTML anchor tags like this: <a href="http://example.com">link text</a>. Only use URLs listed in the context above.
5. If a code example helps, put it on its own lines between [CODE:language] and [/CODE].

Format each outcome as follows:
1. Title (XX%)
Detailed description with hyperlinks...

The probabilities should sum up to 100%.
"#,
        query = query.trim(),
        sources = sources,
    )
}

//! Outcome Extraction Integration Tests
//!
//! Feeds completions shaped like real model output through the public
//! extraction entry points:
//! - Multi-outcome completions with sources and code blocks
//! - Hyperlink allow-listing
//! - Tolerance of malformed and noisy text

use prolly::{extract_outcomes, AppError, CodeSnippet, Hyperlink, OutcomeService};

const MODEL_OUTPUT: &str = r#"Here are the most likely outcomes for your scenario:

1. Rust adoption keeps accelerating (55%)
Large vendors continue to ship Rust in production. <a href="https://example.com/survey">2024 survey</a>
Hiring demand grows steadily.
[CODE:rust]
fn main() {
    println!("hello");
}
[/CODE]

2. Adoption plateaus (30.5%)
Tooling friction slows new teams. <a href="https://blog.invalid/post">unlisted blog</a>

3. Adoption declines (14.5%)
A competing language captures the systems niche.
"#;

const ALLOWED: &[&str] = &["https://example.com/survey"];

// ============================================================================
// Realistic Completion Tests
// ============================================================================

#[test]
fn test_model_output_yields_all_outcomes_in_order() {
    let outcomes = extract_outcomes(MODEL_OUTPUT, ALLOWED).unwrap();

    let numbers: Vec<u64> = outcomes.iter().map(|o| o.option_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(outcomes[0].title, "Rust adoption keeps accelerating");
    assert_eq!(outcomes[1].probability, 30.5);
    assert_eq!(outcomes[2].probability, 14.5);
}

#[test]
fn test_preamble_is_dropped() {
    let outcomes = extract_outcomes(MODEL_OUTPUT, ALLOWED).unwrap();
    for outcome in &outcomes {
        assert!(!outcome.description.contains("most likely outcomes"));
    }
}

#[test]
fn test_code_block_is_captured_outside_description() {
    let outcomes = extract_outcomes(MODEL_OUTPUT, ALLOWED).unwrap();

    assert_eq!(
        outcomes[0].code_snippets,
        vec![CodeSnippet {
            language: "rust".to_string(),
            code: "fn main() {\n    println!(\"hello\");\n}".to_string(),
        }]
    );
    assert!(!outcomes[0].description.contains("println"));
    assert!(outcomes[0].description.contains("Hiring demand grows steadily."));
}

#[test]
fn test_only_allowed_links_are_collected() {
    let outcomes = extract_outcomes(MODEL_OUTPUT, ALLOWED).unwrap();

    assert_eq!(
        outcomes[0].hyperlinks,
        vec![Hyperlink {
            url: "https://example.com/survey".to_string(),
            text: "2024 survey".to_string(),
        }]
    );
    assert!(outcomes[1].hyperlinks.is_empty());
    // The anchor text stays in the description even when the link is rejected
    assert!(outcomes[1].description.contains("unlisted blog"));
}

#[test]
fn test_no_allow_list_collects_no_links() {
    let outcomes = extract_outcomes::<&str>(MODEL_OUTPUT, &[]).unwrap();
    assert!(outcomes.iter().all(|o| o.hyperlinks.is_empty()));
}

// ============================================================================
// Malformed Input Tests
// ============================================================================

#[test]
fn test_unterminated_code_block_is_kept() {
    let text = "1. Outcome (100%)\nIntro\n[CODE:python]\nprint(1)\nprint(2)";
    let outcomes = extract_outcomes::<&str>(text, &[]).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].description, "Intro");
    assert_eq!(outcomes[0].code_snippets[0].language, "python");
    assert_eq!(outcomes[0].code_snippets[0].code, "print(1)\nprint(2)");
}

#[test]
fn test_near_miss_headers_fold_into_description() {
    let text = "1. Real (50%)\n2. Missing percent (50)\n3) Wrong separator (10%)";
    let outcomes = extract_outcomes::<&str>(text, &[]).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].description,
        "2. Missing percent (50)\n3) Wrong separator (10%)"
    );
}

#[test]
fn test_windows_line_endings() {
    let text = "1. A (60%)\r\nfirst\r\n2. B (40%)\r\nsecond\r\n";
    let outcomes = extract_outcomes::<&str>(text, &[]).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].description, "first");
    assert_eq!(outcomes[1].title, "B");
}

#[test]
fn test_out_of_range_headers_stay_in_description() {
    let text = format!(
        "1. A (50%)\n99999999999999999999999. B (20%)\n2. C ({}%)\n3. D (50%)",
        "9".repeat(400)
    );
    let response = OutcomeService::extract_only::<&str>(&text, &[]).unwrap();

    let numbers: Vec<u64> = response.outcomes.iter().map(|o| o.option_number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert!(response.outcomes[0].description.contains("B (20%)"));
    assert!(response.outcomes[0].description.contains("2. C ("));

    let json = serde_json::to_value(&response).unwrap();
    for outcome in json["outcomes"].as_array().unwrap() {
        assert!(outcome["probability"].is_f64());
    }
}

#[test]
fn test_extract_only_reports_no_outcomes() {
    let err = OutcomeService::extract_only::<&str>("nothing to see here", &[]).unwrap_err();
    assert!(matches!(err, AppError::NoOutcomes));
}

#[test]
fn test_response_json_shape() {
    let response = OutcomeService::extract_only(MODEL_OUTPUT, ALLOWED).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["option_number"], 1);
    assert_eq!(outcomes[0]["code_snippets"][0]["language"], "rust");
    // Empty snippet lists are omitted
    assert!(outcomes[1].get("code_snippets").is_none());
    assert_eq!(outcomes[1]["hyperlinks"], serde_json::json!([]));
}

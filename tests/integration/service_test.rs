//! Outcome Service Integration Tests
//!
//! Runs `OutcomeService::generate` end to end with mock providers:
//! - Sources from search flow into the prompt and the link allow-list
//! - Search failures degrade gracefully
//! - Empty, short and headerless completions map to the right errors

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prolly::{AppError, ErrorResponse, OutcomeService};
use prolly_llm::{
    LlmError, LlmProvider, LlmResponse, LlmResult, Message, ProviderConfig, SearchHit,
    SearchProvider, UsageStats,
};

// ============================================================================
// Mock Providers
// ============================================================================

/// Completion provider returning a canned reply and recording prompts
struct MockLlm {
    config: ProviderConfig,
    reply: LlmResult<Option<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    fn replying(text: &str) -> Arc<Self> {
        Self::with_reply(Ok(Some(text.to_string())))
    }

    fn with_reply(reply: LlmResult<Option<String>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        _system: Option<String>,
    ) -> LlmResult<LlmResponse> {
        let prompt = messages
            .into_iter()
            .map(|m| m.content)
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        self.reply.clone().map(|content| LlmResponse {
            content,
            finish_reason: Some("stop".to_string()),
            usage: UsageStats::default(),
            model: self.config.model.clone(),
        })
    }
}

/// Search provider returning fixed hits and recording the requested count
struct MockSearch {
    result: LlmResult<Vec<SearchHit>>,
    requested: Mutex<Option<u32>>,
}

impl MockSearch {
    fn returning(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(hits),
            requested: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Err(LlmError::ServerError {
                message: "upstream unavailable".to_string(),
                status: Some(503),
            }),
            requested: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &'static str {
        "mock-search"
    }

    async fn search(&self, _query: &str, num_results: u32) -> LlmResult<Vec<SearchHit>> {
        *self.requested.lock().unwrap() = Some(num_results);
        self.result.clone()
    }
}

fn hit(title: &str, url: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        url: url.to_string(),
    }
}

fn service(llm: Arc<MockLlm>, search: Option<Arc<MockSearch>>) -> OutcomeService {
    let search = search.map(|s| s as Arc<dyn SearchProvider>);
    OutcomeService::new(llm, search)
}

const COMPLETION: &str = "1. Launch succeeds (65%)\nStrong demand. <a href=\"https://news.test/a\">coverage</a> <a href=\"https://made.up/x\">rumor</a>\n2. Launch slips (35%)\nSupply issues.";

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_generate_full_pipeline() {
    let llm = MockLlm::replying(COMPLETION);
    let search = MockSearch::returning(vec![
        hit("Launch coverage", "https://news.test/a"),
        hit("Analyst note", "https://news.test/b"),
    ]);
    let service = service(llm.clone(), Some(search.clone())).with_num_results(2);

    let response = service.generate("product launch next quarter").await.unwrap();

    assert_eq!(response.outcomes.len(), 2);
    assert_eq!(response.outcomes[0].title, "Launch succeeds");
    assert_eq!(response.outcomes[0].probability, 65.0);
    assert_eq!(response.outcomes[0].hyperlinks.len(), 1);
    assert_eq!(response.outcomes[0].hyperlinks[0].text, "coverage");
    assert_eq!(*search.requested.lock().unwrap(), Some(2));

    let prompt = llm.last_prompt();
    assert!(prompt.contains("product launch next quarter"));
    assert!(prompt.contains("Title: Launch coverage"));
    assert!(prompt.contains("URL: https://news.test/b"));
}

#[tokio::test]
async fn test_generate_without_search_rejects_all_links() {
    let llm = MockLlm::replying(COMPLETION);
    let service = service(llm.clone(), None);

    let response = service.generate("product launch").await.unwrap();

    assert!(response.outcomes.iter().all(|o| o.hyperlinks.is_empty()));
    assert!(llm.last_prompt().contains("no sources were found"));
}

#[tokio::test]
async fn test_search_failure_still_generates() {
    let llm = MockLlm::replying(COMPLETION);
    let service = service(llm, Some(MockSearch::failing()));

    let response = service.generate("product launch").await.unwrap();

    assert_eq!(response.outcomes.len(), 2);
    assert!(response.outcomes.iter().all(|o| o.hyperlinks.is_empty()));
}

// ============================================================================
// Error Mapping Tests
// ============================================================================

#[tokio::test]
async fn test_missing_content_is_empty_completion() {
    let service = service(MockLlm::with_reply(Ok(None)), None);

    let err = service.generate("anything").await.unwrap_err();

    assert!(matches!(err, AppError::EmptyCompletion));
    assert_eq!(
        ErrorResponse::from(&err),
        ErrorResponse::new("Failed to generate meaningful outcomes")
    );
}

#[tokio::test]
async fn test_min_completion_chars_is_configurable() {
    let service = service(MockLlm::replying("1. A (99%)"), None).with_min_completion_chars(50);

    let err = service.generate("anything").await.unwrap_err();
    assert!(matches!(err, AppError::EmptyCompletion));
}

#[tokio::test]
async fn test_headerless_completion_is_no_outcomes() {
    let service = service(
        MockLlm::replying("The future is uncertain and depends on many factors."),
        None,
    );

    let err = service.generate("anything").await.unwrap_err();

    assert!(matches!(err, AppError::NoOutcomes));
    assert_eq!(err.to_string(), "No outcomes were generated");
}

#[tokio::test]
async fn test_provider_failure_is_reported() {
    let service = service(
        MockLlm::with_reply(Err(LlmError::AuthenticationFailed {
            message: "groq: Invalid API key".to_string(),
        })),
        None,
    );

    let err = service.generate("anything").await.unwrap_err();

    assert!(matches!(err, AppError::Llm(LlmError::AuthenticationFailed { .. })));
    assert!(!err.is_retryable());
    assert!(ErrorResponse::from(&err).detail.contains("Invalid API key"));
}

#[tokio::test]
async fn test_empty_query_is_rejected_before_any_call() {
    let llm = MockLlm::replying(COMPLETION);
    let search = MockSearch::returning(vec![]);
    let service = service(llm.clone(), Some(search.clone()));

    let err = service.generate("").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(llm.prompts.lock().unwrap().is_empty());
    assert!(search.requested.lock().unwrap().is_none());
}

//! Web Search
//!
//! Pluggable web search used to gather sources for the outcome prompt. The
//! URLs of the hits double as the hyperlink allow-list for extraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http_client::build_http_client;
use crate::provider::{missing_api_key_error, parse_http_error};
use crate::types::{LlmError, LlmResult};

/// Default Exa search endpoint
pub const EXA_API_URL: &str = "https://api.exa.ai/search";

/// A search result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Trait for pluggable search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for display
    fn name(&self) -> &'static str;

    /// Execute a search query
    async fn search(&self, query: &str, num_results: u32) -> LlmResult<Vec<SearchHit>>;
}

/// Exa search provider (requires API key)
pub struct ExaSearchProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    use_autoprompt: bool,
}

impl ExaSearchProvider {
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> LlmResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(missing_api_key_error("exa"));
        }
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            api_key,
            base_url: EXA_API_URL.to_string(),
            use_autoprompt: true,
        })
    }

    /// Point the provider at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Let Exa rewrite the query into a search-engine friendly prompt
    pub fn with_autoprompt(mut self, use_autoprompt: bool) -> Self {
        self.use_autoprompt = use_autoprompt;
        self
    }

    fn build_request_body(&self, query: &str, num_results: u32) -> serde_json::Value {
        serde_json::json!({
            "query": query,
            "num_results": num_results,
            "use_autoprompt": self.use_autoprompt,
        })
    }
}

/// Exa response body; only the hits are read
#[derive(Debug, Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[async_trait]
impl SearchProvider for ExaSearchProvider {
    fn name(&self) -> &'static str {
        "exa"
    }

    async fn search(&self, query: &str, num_results: u32) -> LlmResult<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(query, num_results))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body_text = response.text().await?;
        if status != 200 {
            return Err(parse_http_error(status, &body_text, "exa"));
        }

        let data: ExaResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse Exa response: {}", e),
            })?;

        tracing::debug!("[ExaSearch] {} result(s) for query", data.results.len());
        Ok(data.results)
    }
}

/// Render hits as the context block embedded in the outcome prompt.
pub fn format_search_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("\nTitle: {}\nURL: {}\n", hit.title, hit.url))
        .collect()
}

/// Hit URLs in search order, used as the hyperlink allow-list.
pub fn allowed_urls(hits: &[SearchHit]) -> Vec<String> {
    hits.iter().map(|hit| hit.url.clone()).collect()
}

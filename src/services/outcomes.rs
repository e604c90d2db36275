//! Outcome Service
//!
//! Orchestrates a single outcome request: web search for grounding sources,
//! prompt construction, completion, and extraction of the completion into
//! outcome records.

use std::sync::Arc;

use prolly_core::{probability_total, OutcomesResponse};
use prolly_extract::{build_outcome_prompt, extract_outcomes};
use prolly_llm::{
    allowed_urls, format_search_context, ExaSearchProvider, GroqProvider, LlmProvider, SearchHit,
    SearchProvider,
};

use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

const DEFAULT_NUM_RESULTS: u32 = 5;
const DEFAULT_MIN_COMPLETION_CHARS: usize = 10;

/// Generates probability-weighted outcomes for a scenario
pub struct OutcomeService {
    llm: Arc<dyn LlmProvider>,
    search: Option<Arc<dyn SearchProvider>>,
    num_results: u32,
    min_completion_chars: usize,
}

impl OutcomeService {
    /// Create a service from explicit providers.
    ///
    /// Without a search provider, prompts carry no sources and no hyperlinks
    /// are ever accepted.
    pub fn new(llm: Arc<dyn LlmProvider>, search: Option<Arc<dyn SearchProvider>>) -> Self {
        Self {
            llm,
            search,
            num_results: DEFAULT_NUM_RESULTS,
            min_completion_chars: DEFAULT_MIN_COMPLETION_CHARS,
        }
    }

    /// Build the Groq and Exa providers described by `config`.
    ///
    /// A completion API key is required. Search is enabled only when an Exa
    /// key is present.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;

        let has_completion_key = config
            .completion
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if !has_completion_key {
            return Err(AppError::config(
                "GROQ_API_KEY is not set; a completion API key is required",
            ));
        }
        let llm: Arc<dyn LlmProvider> = Arc::new(GroqProvider::new(config.completion.clone())?);

        let search: Option<Arc<dyn SearchProvider>> = match config
            .search
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
        {
            Some(key) => {
                let mut provider = ExaSearchProvider::new(key, config.search.timeout_secs)?
                    .with_autoprompt(config.search.use_autoprompt);
                if let Some(base_url) = &config.search.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                Some(Arc::new(provider))
            }
            None => {
                tracing::info!("[OutcomeService] EXA_API_KEY not set, web search disabled");
                None
            }
        };

        Ok(Self::new(llm, search)
            .with_num_results(config.search.num_results)
            .with_min_completion_chars(config.min_completion_chars))
    }

    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_min_completion_chars(mut self, min_chars: usize) -> Self {
        self.min_completion_chars = min_chars;
        self
    }

    /// Name of the completion provider in use
    pub fn provider_name(&self) -> &'static str {
        self.llm.name()
    }

    /// Run the full pipeline for `query`.
    ///
    /// Search failures degrade to an unsourced prompt. Provider errors, a
    /// too-short completion, and a completion with no outcome headers are
    /// returned as errors.
    pub async fn generate(&self, query: &str) -> AppResult<OutcomesResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Query must not be empty"));
        }

        let hits = self.search_sources(query).await;
        let allowed = allowed_urls(&hits);
        let prompt = build_outcome_prompt(query, &format_search_context(&hits));

        tracing::info!(
            "[OutcomeService] Requesting outcomes from {} ({}) with {} source(s)",
            self.llm.name(),
            self.llm.model(),
            hits.len()
        );
        let completion = self.llm.complete(&prompt).await.map_err(|e| {
            tracing::error!("[OutcomeService] Completion failed: {}", e);
            AppError::Llm(e)
        })?;

        if completion.trim().chars().count() < self.min_completion_chars {
            tracing::warn!(
                "[OutcomeService] Completion too short ({} chars)",
                completion.trim().chars().count()
            );
            return Err(AppError::EmptyCompletion);
        }
        tracing::debug!("[OutcomeService] Raw completion:\n{}", completion);

        Self::extract_only(&completion, &allowed)
    }

    /// Extract outcomes from an existing completion without calling any
    /// provider.
    pub fn extract_only<S: AsRef<str>>(
        text: &str,
        allowed_urls: &[S],
    ) -> AppResult<OutcomesResponse> {
        let outcomes = extract_outcomes(text, allowed_urls)?;
        if outcomes.is_empty() {
            tracing::warn!("[OutcomeService] Completion contained no outcome headers");
            return Err(AppError::NoOutcomes);
        }

        for outcome in &outcomes {
            tracing::info!(
                "[OutcomeService] Outcome {}: {} ({}%), {} link(s), {} snippet(s)",
                outcome.option_number,
                outcome.title,
                outcome.probability,
                outcome.hyperlinks.len(),
                outcome.code_snippets.len()
            );
        }
        tracing::debug!(
            "[OutcomeService] Probability total: {}",
            probability_total(&outcomes)
        );

        Ok(OutcomesResponse::from(outcomes))
    }

    async fn search_sources(&self, query: &str) -> Vec<SearchHit> {
        let Some(search) = &self.search else {
            return Vec::new();
        };
        match search.search(query, self.num_results).await {
            Ok(hits) => {
                tracing::debug!(
                    "[OutcomeService] {} returned {} hit(s)",
                    search.name(),
                    hits.len()
                );
                hits
            }
            Err(e) => {
                tracing::warn!(
                    "[OutcomeService] Search via {} failed, continuing without sources: {}",
                    search.name(),
                    e
                );
                Vec::new()
            }
        }
    }
}

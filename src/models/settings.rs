//! Settings Models
//!
//! Application configuration stored in config.json. API keys are never
//! written to disk; they are injected from the environment at startup.

use serde::{Deserialize, Serialize};

use prolly_llm::ProviderConfig;

/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable holding the Exa API key
pub const EXA_API_KEY_ENV: &str = "EXA_API_KEY";
/// Environment variable overriding the completion model
pub const MODEL_ENV: &str = "PROLLY_MODEL";

/// Web search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Number of hits requested per query
    pub num_results: u32,
    pub use_autoprompt: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            num_results: 5,
            use_autoprompt: true,
            timeout_secs: 15,
        }
    }
}

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat-completion provider settings
    #[serde(default)]
    pub completion: ProviderConfig,
    #[serde(default)]
    pub search: SearchSettings,
    /// Completions shorter than this (after trimming) are rejected as empty
    #[serde(default = "default_min_completion_chars")]
    pub min_completion_chars: usize,
}

fn default_min_completion_chars() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            completion: ProviderConfig::default(),
            search: SearchSettings::default(),
            min_completion_chars: default_min_completion_chars(),
        }
    }
}

impl AppConfig {
    /// Apply credentials and overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply credentials and overrides from an arbitrary variable source.
    ///
    /// Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = get(GROQ_API_KEY_ENV) {
            self.completion.api_key = Some(key);
        }
        if let Some(key) = get(EXA_API_KEY_ENV) {
            self.search.api_key = Some(key);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.completion.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.completion.model.trim().is_empty() {
            return Err("Completion model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.completion.temperature
            ));
        }
        if self.completion.max_tokens == 0 {
            return Err("max_tokens must be greater than zero".to_string());
        }
        if self.search.num_results == 0 {
            return Err("Search num_results must be greater than zero".to_string());
        }
        for (name, endpoint) in [
            ("completion.base_url", &self.completion.base_url),
            ("search.base_url", &self.search.base_url),
        ] {
            if let Some(endpoint) = endpoint {
                url::Url::parse(endpoint)
                    .map_err(|e| format!("Invalid {} '{}': {}", name, endpoint, e))?;
            }
        }
        Ok(())
    }
}

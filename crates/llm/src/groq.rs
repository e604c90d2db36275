//! Groq Provider
//!
//! Implementation of the LlmProvider trait for Groq's OpenAI-compatible
//! chat-completions API.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmResponse, LlmResult, Message, MessageRole, ProviderConfig, UsageStats,
    GROQ_API_URL,
};
use crate::http_client::build_http_client;

/// Groq provider
pub struct GroqProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GroqProvider {
    /// Create a new Groq provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    /// Get the API endpoint
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GROQ_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, messages: &[Message], system: Option<&str>) -> serde_json::Value {
        let mut chat_messages: Vec<serde_json::Value> = Vec::new();

        if let Some(sys) = system {
            chat_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for msg in messages {
            let role = match msg.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
                MessageRole::System => "system",
            };
            chat_messages.push(serde_json::json!({
                "role": role,
                "content": msg.content
            }));
        }

        serde_json::json!({
            "model": self.config.model,
            "messages": chat_messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        })
    }

    /// Parse a response from the chat-completions API
    fn parse_response(&self, response: ChatResponse) -> LlmResponse {
        let choice = response.choices.into_iter().next();
        let usage = response
            .usage
            .map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        let (content, finish_reason) = match choice {
            Some(c) => (c.message.and_then(|m| m.content), c.finish_reason),
            None => (None, None),
        };

        LlmResponse {
            content,
            finish_reason,
            usage,
            model: response.model.unwrap_or_else(|| self.config.model.clone()),
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
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
        system: Option<String>,
    ) -> LlmResult<LlmResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing_api_key_error("groq"))?;

        let body = self.build_request_body(&messages, system.as_deref());

        tracing::debug!(
            "[GroqProvider] Sending {} message(s) to {} (model {})",
            messages.len(),
            self.base_url(),
            self.config.model
        );

        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body_text = response.text().await?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "groq"));
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let parsed = self.parse_response(chat_response);
        tracing::debug!(
            "[GroqProvider] Completion finished ({:?}), {} input / {} output tokens",
            parsed.finish_reason,
            parsed.usage.input_tokens,
            parsed.usage.output_tokens
        );
        Ok(parsed)
    }
}

/// Chat-completions response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

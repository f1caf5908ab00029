/// LLM Client — the single point of entry for all completion-backend calls in Waypoint.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All completions MUST go through `CompletionBackend`.
///
/// This layer is a thin transport: no retries, no parsing of the completion text.
/// Retries and recovery belong to the analysis orchestrator.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod prompts;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all completions. Hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("completion backend returned empty content")]
    EmptyCompletion,
}

/// Raw text returned by the backend. Opaque until reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion(pub String);

impl RawCompletion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A chat-style text completion capability: system + user message in, free text out.
///
/// Carried by the orchestrator as `Arc<dyn CompletionBackend>`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<RawCompletion, CompletionError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Concatenates all text blocks. Returns `None` when there is no non-blank text.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(config.request_timeout).build()?,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<RawCompletion, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::BackendUnavailable("no API key configured".to_string())
        })?;

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::BackendUnavailable(format!("transport error: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("{} response body bytes", body.len()));
            warn!("Completion backend returned {status}: {message}");
            return Err(CompletionError::BackendUnavailable(format!(
                "status {}: {message}",
                status.as_u16()
            )));
        }

        let llm_response: LlmResponse = response.json().await.map_err(|e| {
            CompletionError::BackendUnavailable(format!("undecodable response body: {e}"))
        })?;

        debug!(
            "Completion succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(RawCompletion)
            .ok_or(CompletionError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn response(blocks: serde_json::Value) -> LlmResponse {
        serde_json::from_value(serde_json::json!({
            "content": blocks,
            "usage": {"input_tokens": 10, "output_tokens": 20}
        }))
        .unwrap()
    }

    #[test]
    fn test_text_joins_text_blocks() {
        let r = response(serde_json::json!([
            {"type": "text", "text": "{\"a\":"},
            {"type": "tool_use"},
            {"type": "text", "text": " 1}"}
        ]));
        assert_eq!(r.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_text_blank_content_is_none() {
        let r = response(serde_json::json!([{"type": "text", "text": "   "}]));
        assert!(r.text().is_none());
        let r = response(serde_json::json!([]));
        assert!(r.text().is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_backend_unavailable() {
        let client = LlmClient::new(&LlmConfig {
            api_key: None,
            api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert!(!client.is_configured());

        let err = client.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, CompletionError::BackendUnavailable(_)));
    }
}

//! Chat Completions Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. OpenRouter is
//! the default target, so a hosted model can be swapped for another by
//! changing the model name only.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Bearer auth plus the optional OpenRouter attribution headers
//! - Retry on connection errors, 429 and 5xx per the configured `RetryPolicy`
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use harvester_llm::{ChatCompletionsProvider, ChatConfig};
//!
//! let config = ChatConfig::new("sk-or-...", "meta-llama/llama-3.1-8b-instruct");
//! let provider = ChatCompletionsProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use harvester_domain::traits::LlmProvider;
use harvester_domain::{retry_with_policy, RetryPolicy};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default API endpoint (OpenRouter)
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`ChatCompletionsProvider`]
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub endpoint: String,

    /// Bearer token
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Optional `HTTP-Referer` header
    pub referer: Option<String>,

    /// Optional `X-Title` header
    pub title: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Retry budget for retryable failures
    pub retry: RetryPolicy,
}

impl ChatConfig {
    /// Default endpoint and timeout with the given key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            referer: None,
            title: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

/// Provider for OpenAI-compatible chat completion APIs
pub struct ChatCompletionsProvider {
    config: Arc<ChatConfig>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsProvider {
    /// Create a provider from its configuration
    pub fn new(config: ChatConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Unauthorized("API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    fn url(&self) -> String {
        completions_url(&self.config.endpoint)
    }
}

fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}

/// One completion request, re-sent as is on every attempt
struct CompletionCall {
    client: reqwest::Client,
    config: Arc<ChatConfig>,
    system: String,
    prompt: String,
}

impl CompletionCall {
    async fn send(&self) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system,
                },
                ChatMessage {
                    role: "user",
                    content: &self.prompt,
                },
            ],
            temperature: 0.0,
        };

        let mut request = self
            .client
            .post(completions_url(&self.config.endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            request = request.header("X-Title", title);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, &self.config.model, error_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))
    }
}

fn classify_status(status: StatusCode, model: &str, body: String) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(body),
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        s if s.is_server_error() => LlmError::Communication(format!("HTTP {}: {}", s, body)),
        s => LlmError::InvalidResponse(format!("HTTP {}: {}", s, body)),
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    type Error = LlmError;

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        let mut call = CompletionCall {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            system: system.to_string(),
            prompt: prompt.to_string(),
        };

        retry_with_policy(&self.config.retry, &mut call, LlmError::is_retryable, |call| {
            Box::pin(call.send())
        })
        .await
        .inspect_err(|e| debug!(model = %self.config.model, "LLM call failed: {}", e))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = ChatCompletionsProvider::new(ChatConfig::new("key", "model-x")).unwrap();
        assert_eq!(provider.model_name(), "model-x");
        assert_eq!(provider.url(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = ChatCompletionsProvider::new(ChatConfig::new("  ", "model-x"));
        assert!(matches!(result, Err(LlmError::Unauthorized(_))));
    }

    #[test]
    fn test_trailing_slash_endpoint() {
        let mut config = ChatConfig::new("key", "m");
        config.endpoint = "http://localhost:8000/v1/".to_string();
        let provider = ChatCompletionsProvider::new(config).unwrap();
        assert_eq!(provider.url(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "m", String::new()),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "m", String::new()),
            LlmError::Communication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "m", String::new()),
            LlmError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "m", String::new()),
            LlmError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let mut config = ChatConfig::new("key", "m");
        config.endpoint = "http://127.0.0.1:9".to_string();
        config.timeout = Duration::from_secs(2);
        config.retry = RetryPolicy::none();
        let provider = ChatCompletionsProvider::new(config).unwrap();

        let result = provider.generate("sys", "hello").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    // Requires OPENROUTER_API_KEY and network access
    #[tokio::test]
    #[ignore]
    async fn test_generate_integration() {
        let key = std::env::var("OPENROUTER_API_KEY").unwrap_or_default();
        let provider =
            ChatCompletionsProvider::new(ChatConfig::new(key, "meta-llama/llama-3.1-8b-instruct"))
                .unwrap();
        let result = provider.generate("Answer with one word.", "Say hello").await;
        assert!(result.map(|r| !r.is_empty()).unwrap_or(false));
    }
}

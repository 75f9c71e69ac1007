//! LLM client abstraction and request/response types.
//!
//! This module defines the core abstractions for interacting with LLM providers.

use recall_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// LLM completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// The prompt text to send to the LLM
    pub prompt: String,

    /// Model identifier (e.g., "phi3", "llama3.2")
    pub model: String,

    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl LlmRequest {
    /// Create a new LLM request with required fields.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            system: None,
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

/// Trait for LLM providers.
///
/// This trait abstracts the underlying LLM provider (Ollama, mock, ...)
/// and provides a unified completion interface. One call produces one
/// completion.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "ollama", "mock").
    fn provider_name(&self) -> &str;

    /// Perform a non-streaming completion.
    ///
    /// # Arguments
    /// * `request` - The completion request
    ///
    /// # Returns
    /// The complete LLM response
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse>;
}

/// Run a completion, failing with `AppError::Llm` if it outlives `timeout`.
///
/// `None` waits indefinitely.
pub async fn complete_with_timeout(
    client: &dyn LlmClient,
    request: &LlmRequest,
    timeout: Option<Duration>,
) -> AppResult<LlmResponse> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, client.complete(request))
            .await
            .map_err(|_| {
                AppError::Llm(format!(
                    "{} did not answer within {}s",
                    client.provider_name(),
                    limit.as_secs_f64()
                ))
            })?,
        None => client.complete(request).await,
    }
}

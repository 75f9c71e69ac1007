//! Mock LLM provider that replays scripted completions.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use recall_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock provider for testing and offline development.
///
/// Each call to `complete` pops the next scripted response. Requests are
/// recorded so tests can assert on what the pipeline sent and how often.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<LlmRequest>>,
    delay: Option<Duration>,
}

impl MockClient {
    /// Create a mock that answers with `responses`, in order.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Create a mock whose next call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::default();
        mock.push_error(message);
        mock
    }

    /// Sleep before answering (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue another successful response.
    pub fn push_response(&self, content: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Ok(content.into()));
        }
    }

    /// Queue a failure.
    pub fn push_error(&self, message: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Err(AppError::Llm(message.into())));
        }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of every request received.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests
            .lock()
            .map_err(|_| AppError::Llm("mock request log poisoned".to_string()))?
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .map_err(|_| AppError::Llm("mock response queue poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Llm("mock has no scripted response".to_string())))?;

        tracing::debug!("Mock completion: {:?}", next);

        Ok(LlmResponse {
            content: next,
            model: request.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let client = MockClient::new(vec!["first".to_string(), "second".to_string()]);
        let request = LlmRequest::new("q", "mock");

        assert_eq!(client.complete(&request).await.unwrap().content, "first");
        assert_eq!(client.complete(&request).await.unwrap().content, "second");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_exhausted_is_an_error() {
        let client = MockClient::new(vec![]);
        let result = client.complete(&LlmRequest::new("q", "mock")).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let client = MockClient::failing("connection refused");
        let err = client
            .complete(&LlmRequest::new("q", "mock"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}

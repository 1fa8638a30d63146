//! Scripted in-memory provider for tests and dry runs.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use platskill_core::{AppError, AppResult};
use std::sync::Mutex;

type Responder = dyn Fn(&LlmRequest) -> AppResult<String> + Send + Sync;

/// Provider whose replies come from a closure instead of the network.
///
/// Every request is recorded so callers can assert on what was sent and how
/// many calls were made.
pub struct MockClient {
    responder: Box<Responder>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockClient {
    /// Reply to each request with whatever `responder` returns.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&LlmRequest) -> AppResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always reply with the same text.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fail with a transport error carrying `status`.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(AppError::transport_status(status, message.clone())))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
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
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let content = (self.responder)(request)?;
        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replying_records_requests() {
        let client = MockClient::replying("pong");
        let response = client
            .complete(&LlmRequest::new("ping", "m"))
            .await
            .unwrap();
        assert_eq!(response.content, "pong");
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.requests()[0].prompt, "ping");
    }

    #[tokio::test]
    async fn test_failing_returns_transport_error() {
        let client = MockClient::failing(503, "unavailable");
        let result = client.complete(&LlmRequest::new("ping", "m")).await;
        assert!(matches!(
            result,
            Err(AppError::Transport {
                status: Some(503),
                ..
            })
        ));
    }
}

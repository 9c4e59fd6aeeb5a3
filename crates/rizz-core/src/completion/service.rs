//! Completion service wrapper with timeouts and observability.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{
    CompletionProvider, CompletionRequest, CompletionResponse, Error, Result, TRACING_TARGET,
};

/// Default upper bound for a single completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion service with observability.
///
/// Wraps any [`CompletionProvider`], bounds every call with a timeout and logs
/// start, success and failure with the elapsed time. Prompts are never logged,
/// only their length.
#[derive(Clone)]
pub struct CompletionService {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CompletionService {
    /// Creates a new completion service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: CompletionProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the timeout applied to every call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Generates a completion.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            prompt_len = request.prompt.len(),
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Processing completion request"
        );

        let result = match tokio::time::timeout(self.timeout, self.provider.complete(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::timeout("completion", self.timeout)),
        };
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    model = response.model.as_deref().unwrap_or("unknown"),
                    text_len = response.text.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Completion successful"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    kind = %error.kind(),
                    elapsed_ms = elapsed.as_millis(),
                    "Completion failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::completion::MockCompletionProvider;

    #[tokio::test]
    async fn returns_provider_text() {
        let provider = MockCompletionProvider::new("Sounds fun!\nI'm in.");
        let service = CompletionService::from_provider(provider.clone());

        let request = CompletionRequest::new("prompt");
        let response = service.complete(&request).await.unwrap();
        assert_eq!(response.text, "Sounds fun!\nI'm in.");
        assert_eq!(provider.calls(), 1);

        let seen = provider.last_request().unwrap();
        assert_eq!(seen.max_tokens, 256);
        assert!((seen.temperature - 0.9).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn keeps_upstream_details_on_failure() {
        let details = json!({ "error": { "message": "Incorrect API key provided" } });
        let provider = MockCompletionProvider::failing("HTTP 401").with_details(details.clone());
        let service = CompletionService::from_provider(provider);

        let error = service
            .complete(&CompletionRequest::new("prompt"))
            .await
            .unwrap_err();
        assert_eq!(error.details(), Some(&details));
    }

    #[tokio::test]
    async fn times_out_slow_providers() {
        let provider = MockCompletionProvider::new("late").with_delay(Duration::from_millis(500));
        let service =
            CompletionService::from_provider(provider).with_timeout(Duration::from_millis(20));

        let error = service
            .complete(&CompletionRequest::new("prompt"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Timeout);
    }
}

//! Mock completion provider for testing.
//!
//! This module is only available when the `test-utils` feature is enabled.
//! Clones share the call counter and the last recorded request.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    CompletionProvider, CompletionRequest, CompletionResponse, CompletionService, Error, Result,
};

#[derive(Clone, Debug)]
enum Outcome {
    Text(String),
    Failure {
        message: String,
        details: Option<serde_json::Value>,
    },
}

/// Completion provider returning fixed text or a fixed failure.
#[derive(Clone, Debug)]
pub struct MockCompletionProvider {
    outcome: Outcome,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new("")
    }
}

impl MockCompletionProvider {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a provider that always answers with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Creates a provider that always fails with an external service error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Failure {
            message: message.into(),
            details: None,
        })
    }

    /// Attaches an upstream error payload to failures.
    pub fn with_details(mut self, payload: serde_json::Value) -> Self {
        if let Outcome::Failure { details, .. } = &mut self.outcome {
            *details = Some(payload);
        }
        self
    }

    /// Delays every answer, useful to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns how many times `complete` was invoked across all clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the most recent request seen by any clone.
    #[must_use]
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Wraps this provider into a [`CompletionService`].
    pub fn into_service(self) -> CompletionService {
        CompletionService::from_provider(self)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(CompletionResponse::new(text.clone()).with_model("mock")),
            Outcome::Failure { message, details } => {
                let error = Error::external("mock-completion", message);
                Err(match details {
                    Some(details) => error.with_details(details.clone()),
                    None => error,
                })
            }
        }
    }
}

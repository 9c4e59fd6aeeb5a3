//! Mock annotation provider for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! rizz-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! Clones share the call counter, so a test can keep one handle and move the
//! other into a service:
//!
//! ```rust,ignore
//! let provider = MockAnnotationProvider::new(AnnotationResult::new("hi", vec![]));
//! let service = provider.clone().into_service();
//! // ... exercise the service ...
//! assert_eq!(provider.calls(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{
    AnnotationProvider, AnnotationRequest, AnnotationResult, AnnotationService, Error, Result,
};

/// Annotation provider returning a fixed result or a fixed failure.
#[derive(Clone, Debug)]
pub struct MockAnnotationProvider {
    outcome: std::result::Result<AnnotationResult, String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockAnnotationProvider {
    fn default() -> Self {
        Self::new(AnnotationResult::default())
    }
}

impl MockAnnotationProvider {
    /// Creates a provider that always succeeds with `result`.
    pub fn new(result: AnnotationResult) -> Self {
        Self {
            outcome: Ok(result),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a provider that always fails with an external service error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delays every answer, useful to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns how many times `annotate` was invoked across all clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wraps this provider into an [`AnnotationService`].
    pub fn into_service(self) -> AnnotationService {
        AnnotationService::from_provider(self)
    }
}

#[async_trait::async_trait]
impl AnnotationProvider for MockAnnotationProvider {
    async fn annotate(&self, _request: &AnnotationRequest) -> Result<AnnotationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(Error::external("mock-annotation", message)),
        }
    }
}

//! Annotation service wrapper with timeouts and observability.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{
    AnnotationProvider, AnnotationRequest, AnnotationResult, Error, Result, TRACING_TARGET,
};

/// Default upper bound for a single annotation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Annotation service with observability.
///
/// Wraps any [`AnnotationProvider`], bounds every call with a timeout and logs
/// start, success and failure with the elapsed time. The provider is shared
/// behind an `Arc`, so cloning the service is cheap.
#[derive(Clone)]
pub struct AnnotationService {
    provider: Arc<dyn AnnotationProvider>,
    timeout: Duration,
}

impl fmt::Debug for AnnotationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AnnotationService {
    /// Creates a new annotation service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: AnnotationProvider + 'static,
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

    /// Annotates an image.
    ///
    /// Returned labels never exceed `request.max_labels`.
    pub async fn annotate(&self, request: &AnnotationRequest) -> Result<AnnotationResult> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            image = request.image.kind(),
            image_len = request.image.payload_len(),
            "Processing annotation request"
        );

        let result = match tokio::time::timeout(self.timeout, self.provider.annotate(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::timeout("annotation", self.timeout)),
        };
        let elapsed = started_at.elapsed();

        match result {
            Ok(mut annotation) => {
                annotation.labels.truncate(request.max_labels as usize);

                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    text_len = annotation.full_text.len(),
                    labels = annotation.labels.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Annotation successful"
                );

                Ok(annotation)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    kind = %error.kind(),
                    elapsed_ms = elapsed.as_millis(),
                    "Annotation failed"
                );

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::MockAnnotationProvider;
    use crate::types::ImageSource;
    use crate::ErrorKind;

    fn request() -> AnnotationRequest {
        let image = ImageSource::from_url("https://example.com/chat.png").unwrap();
        AnnotationRequest::new(image)
    }

    #[tokio::test]
    async fn returns_provider_result() {
        let provider = MockAnnotationProvider::new(AnnotationResult::new(
            "hey, are you free tonight?",
            vec!["Text".into(), "Screenshot".into()],
        ));
        let service = AnnotationService::from_provider(provider.clone());

        let result = service.annotate(&request()).await.unwrap();
        assert_eq!(result.full_text, "hey, are you free tonight?");
        assert_eq!(result.labels, vec!["Text", "Screenshot"]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn truncates_labels_to_budget() {
        let labels = (1..=8).map(|i| format!("label-{i}")).collect();
        let provider = MockAnnotationProvider::new(AnnotationResult::new("", labels));
        let service = AnnotationService::from_provider(provider);

        let result = service.annotate(&request()).await.unwrap();
        assert_eq!(result.labels.len(), 5);
        assert_eq!(result.labels[4], "label-5");
    }

    #[tokio::test]
    async fn times_out_slow_providers() {
        let provider = MockAnnotationProvider::default().with_delay(Duration::from_millis(500));
        let service =
            AnnotationService::from_provider(provider).with_timeout(Duration::from_millis(20));

        let error = service.annotate(&request()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn propagates_provider_errors() {
        let provider = MockAnnotationProvider::failing("quota exceeded");
        let service = AnnotationService::from_provider(provider);

        let error = service.annotate(&request()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.message().contains("quota exceeded"));
    }
}

//! Google Cloud Vision client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use rizz_core::{AnnotationProvider, AnnotationRequest, AnnotationResult, AnnotationService};

use super::config::VisionConfig;
use super::model::{AnnotateImagesRequest, AnnotateImagesResponse};
use crate::error::{Error, Result};

/// Tracing target for Vision client operations.
pub const TRACING_TARGET: &str = "rizz_reqwest::vision";

/// Service name used in errors.
const SERVICE: &str = "google-vision";

/// Inner client that holds the HTTP client and configuration.
struct VisionClientInner {
    http: Client,
    api_key: String,
    endpoint: String,
    config: VisionConfig,
}

/// Google Cloud Vision client.
///
/// Sends one `images:annotate` call per request with text and label detection.
///
/// # Examples
///
/// ```rust,ignore
/// use rizz_reqwest::{VisionClient, VisionConfig};
///
/// let client = VisionClient::new(VisionConfig::new(api_key))?;
/// let service = client.into_service();
/// let result = service.annotate(&AnnotationRequest::new(image)).await?;
/// ```
#[derive(Clone)]
pub struct VisionClient {
    inner: Arc<VisionClientInner>,
}

impl std::fmt::Debug for VisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl VisionClient {
    /// Creates a new Vision client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot be built.
    pub fn new(config: VisionConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Config("Google Cloud API key is not set".into()))?
            .to_owned();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %config.vision_base_url,
            timeout_ms = config.timeout().as_millis(),
            "Creating vision client"
        );

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(crate::user_agent())
            .build()?;

        let inner = VisionClientInner {
            http,
            api_key,
            endpoint: config.endpoint(),
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &VisionConfig {
        &self.inner.config
    }

    /// Converts this client into an [`AnnotationService`] bounded by the configured timeout.
    pub fn into_service(self) -> AnnotationService {
        let timeout = self.inner.config.timeout();
        AnnotationService::from_provider(self).with_timeout(timeout)
    }

    async fn send(&self, request: &AnnotationRequest) -> Result<AnnotationResult> {
        let body = AnnotateImagesRequest::new(&request.image, request.max_labels);

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .query(&[("key", self.inner.api_key.as_str())])
            .header("X-Request-Id", request.request_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status, &body));
        }

        let batch: AnnotateImagesResponse = serde_json::from_slice(
            &response
                .bytes()
                .await
                .map_err(reqwest::Error::without_url)?,
        )?;
        let item = batch.responses.into_iter().next().unwrap_or_default();

        if let Some(status) = item.error.as_ref().filter(|status| status.code != 0) {
            return Err(Error::Rejected {
                message: status.message.clone(),
                details: serde_json::to_value(status).ok(),
            });
        }

        Ok(item.into_result())
    }
}

#[async_trait::async_trait]
impl AnnotationProvider for VisionClient {
    async fn annotate(&self, request: &AnnotationRequest) -> rizz_core::Result<AnnotationResult> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            image = request.image.kind(),
            "Sending annotate request"
        );

        let result = self.send(request).await;
        let elapsed = started_at.elapsed();

        match result {
            Ok(annotation) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    labels = annotation.labels.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Annotate request completed"
                );
                Ok(annotation)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Annotate request failed"
                );
                Err(error.into_core(SERVICE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rizz_core::{ErrorKind, ImageSource};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> VisionClient {
        let config = VisionConfig::new("test-key").with_base_url(server.uri());
        VisionClient::new(config).unwrap()
    }

    fn inline_request() -> AnnotationRequest {
        AnnotationRequest::new(ImageSource::Inline {
            mime_type: Some("image/png".into()),
            data: "aGVsbG8=".into(),
        })
    }

    #[test]
    fn test_requires_api_key() {
        let result = VisionClient::new(VisionConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_annotates_inline_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(query_param("key", "test-key"))
            .and(header_exists("x-request-id"))
            .and(body_partial_json(json!({
                "requests": [{
                    "image": { "content": "aGVsbG8=" },
                    "features": [
                        { "type": "TEXT_DETECTION" },
                        { "type": "LABEL_DETECTION", "maxResults": 5 }
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{
                    "fullTextAnnotation": { "text": "dinner friday?\n" },
                    "labelAnnotations": [
                        { "description": "Text" },
                        { "description": "Font" }
                    ]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).annotate(&inline_request()).await.unwrap();
        assert_eq!(result.full_text, "dinner friday?");
        assert_eq!(result.labels, vec!["Text", "Font"]);
    }

    #[tokio::test]
    async fn test_annotates_image_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(body_partial_json(json!({
                "requests": [{
                    "image": { "source": { "imageUri": "https://example.com/chat.png" } }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "responses": [{}] })))
            .expect(1)
            .mount(&server)
            .await;

        let image = ImageSource::from_url("https://example.com/chat.png").unwrap();
        let result = client(&server)
            .annotate(&AnnotationRequest::new(image))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_keeps_payload() {
        let server = MockServer::start().await;
        let payload = json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let error = client(&server)
            .annotate(&inline_request())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.message(), "google-vision: HTTP 403: API key not valid");
        assert_eq!(error.details(), Some(&payload));
        assert!(!error.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_per_image_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
            })))
            .mount(&server)
            .await;

        let error = client(&server)
            .annotate(&inline_request())
            .await
            .unwrap_err();
        assert_eq!(error.message(), "google-vision: Bad image data.");
        assert_eq!(
            error.details(),
            Some(&json!({ "code": 3, "message": "Bad image data." }))
        );
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let config = VisionConfig::new("test-key").with_base_url("http://127.0.0.1:9");
        let client = VisionClient::new(config).unwrap();

        let error = client.annotate(&inline_request()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(!error.to_string().contains("test-key"));
    }
}

//! OpenAI-compatible chat completion client using reqwest.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use rizz_core::{CompletionProvider, CompletionRequest, CompletionResponse, CompletionService};

use super::config::OpenAiConfig;
use super::model::{ChatCompletionRequest, ChatCompletionResponse};
use crate::error::{Error, Result};

/// Tracing target for completion client operations.
pub const TRACING_TARGET: &str = "rizz_reqwest::openai";

/// Service name used in errors.
const SERVICE: &str = "openai";

struct OpenAiClientInner {
    http: Client,
    api_key: String,
    endpoint: String,
    config: OpenAiConfig,
}

/// Chat completion client for OpenAI and compatible APIs.
#[derive(Clone)]
pub struct OpenAiClient {
    inner: Arc<OpenAiClientInner>,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a new completion client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Config("OpenAI API key is not set".into()))?
            .to_owned();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %config.openai_base_url,
            model = %config.openai_model,
            timeout_ms = config.timeout().as_millis(),
            "Creating completion client"
        );

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(crate::user_agent())
            .build()?;

        let inner = OpenAiClientInner {
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
    pub fn config(&self) -> &OpenAiConfig {
        &self.inner.config
    }

    /// Converts this client into a [`CompletionService`] bounded by the configured timeout.
    pub fn into_service(self) -> CompletionService {
        let timeout = self.inner.config.timeout();
        CompletionService::from_provider(self).with_timeout(timeout)
    }

    async fn send(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let body = ChatCompletionRequest::user(
            &self.inner.config.openai_model,
            &request.prompt,
            request.max_tokens,
            request.temperature,
        );

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.api_key)
            .header("X-Request-Id", request.request_id.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status, &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_slice(&response.bytes().await?)?;
        let model = completion.model.clone();
        let text = completion.into_text().ok_or(Error::EmptyResponse)?;

        let response = CompletionResponse::new(text);
        Ok(match model {
            Some(model) => response.with_model(model),
            None => response,
        })
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> rizz_core::Result<CompletionResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            model = %self.inner.config.openai_model,
            "Sending chat completion request"
        );

        let result = self.send(request).await;
        let elapsed = started_at.elapsed();

        match result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    text_len = response.text.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Chat completion request completed"
                );
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Chat completion request failed"
                );
                Err(error.into_core(SERVICE))
            }
        }
    }
}

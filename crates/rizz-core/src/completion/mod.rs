//! Text completion through a large language model.
//!
//! Implement [`CompletionProvider`] for a concrete backend and wrap it in a
//! [`CompletionService`] to get timeouts and structured logging.

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod service;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockCompletionProvider;
use serde::{Deserialize, Serialize};
pub use service::CompletionService;
use uuid::Uuid;

pub use crate::{Error, Result};

/// Tracing target for completion operations.
pub const TRACING_TARGET: &str = "rizz_core::completion";

/// Default token budget for one completion.
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Backend capable of generating text for a prompt.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generates a completion for the request prompt.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// A single completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Identifier used to correlate logs of one call.
    pub request_id: Uuid,
    /// Prompt sent as a single user message.
    pub prompt: String,
    /// Maximum number of generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a request with the default token budget and temperature.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Generated text returned by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Raw generated text.
    pub text: String,
    /// Model that produced the text, when reported.
    pub model: Option<String>,
}

impl CompletionResponse {
    /// Creates a response with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Sets the reporting model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

//! OpenAI-compatible client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for completion requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the OpenAI-compatible completion client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct OpenAiConfig {
    /// API key sent as a bearer token
    #[cfg_attr(
        feature = "config",
        arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing, default)]
    pub openai_api_key: Option<String>,

    /// Base URL of the API, including the version prefix
    #[cfg_attr(
        feature = "config",
        arg(long = "openai-base-url", env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub openai_base_url: String,

    /// Chat model identifier
    #[cfg_attr(
        feature = "config",
        arg(long = "openai-model", env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)
    )]
    #[serde(default = "default_model")]
    pub openai_model: String,

    /// Timeout for completion requests in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "openai-timeout-secs", env = "OPENAI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub openai_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("has_api_key", &self.api_key().is_some())
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .finish()
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_base_url(),
            openai_model: default_model(),
            openai_timeout_secs: default_timeout_secs(),
        }
    }
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_base_url = base_url.into();
        self
    }

    /// Set the chat model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.openai_model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.openai_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Returns the API key when one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout_secs.max(1))
    }

    /// Returns the `chat/completions` endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.openai_base_url.trim_end_matches('/')
        )
    }
}

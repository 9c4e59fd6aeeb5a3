//! Google Cloud Vision client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default Vision API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com";

/// Default timeout for annotation requests: 15 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the Google Cloud Vision client.
///
/// The API key is optional so the server can start without it; annotation is
/// skipped when no key is set.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct VisionConfig {
    /// Google Cloud API key with the Vision API enabled
    #[cfg_attr(
        feature = "config",
        arg(long = "google-cloud-api-key", env = "GOOGLE_CLOUD_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing, default)]
    pub google_cloud_api_key: Option<String>,

    /// Base URL of the Vision API
    #[cfg_attr(
        feature = "config",
        arg(long = "vision-base-url", env = "VISION_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub vision_base_url: String,

    /// Timeout for annotation requests in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "vision-timeout-secs", env = "VISION_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub vision_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("has_api_key", &self.api_key().is_some())
            .field("vision_base_url", &self.vision_base_url)
            .field("vision_timeout_secs", &self.vision_timeout_secs)
            .finish()
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            google_cloud_api_key: None,
            vision_base_url: default_base_url(),
            vision_timeout_secs: default_timeout_secs(),
        }
    }
}

impl VisionConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.google_cloud_api_key = Some(api_key.into());
        self
    }

    /// Set the base URL, mostly useful for tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.vision_base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.vision_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Returns the API key when one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.google_cloud_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.vision_timeout_secs.max(1))
    }

    /// Returns the `images:annotate` endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/images:annotate",
            self.vision_base_url.trim_end_matches('/')
        )
    }
}

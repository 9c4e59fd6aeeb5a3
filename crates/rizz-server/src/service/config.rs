use std::fmt;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use rizz_core::completion::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use rizz_core::{ReplyFormat, ReplyStrategy};
use serde::{Deserialize, Serialize};

use crate::service::{CallerSecret, Error, ReplySettings, Result};

/// Upper bound on the configurable number of suggestions.
const MAX_SUGGESTION_COUNT: usize = 10;

/// Upper bound on the sampling temperature.
const MAX_TEMPERATURE: f32 = 2.0;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Shared secret callers present as `Authorization: Bearer <secret>`.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RIZZ_API_SECRET", hide_env_values = true)
    )]
    #[serde(skip_serializing, default)]
    pub api_secret: String,

    /// Reply format requested from the completion service (`lines` or `json`).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RIZZ_REPLY_FORMAT", default_value = "lines")
    )]
    #[builder(default)]
    pub reply_format: ReplyFormat,

    /// Number of suggestions, defaults to 4 for `lines` and 5 for `json`.
    #[cfg_attr(feature = "config", arg(long, env = "RIZZ_SUGGESTION_COUNT"))]
    #[builder(default)]
    pub suggestion_count: Option<usize>,

    /// Upper bound on tokens generated per completion.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RIZZ_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)
    )]
    #[builder(default = "DEFAULT_MAX_TOKENS")]
    pub max_tokens: u32,

    /// Sampling temperature of the completion.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RIZZ_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)
    )]
    #[builder(default = "DEFAULT_TEMPERATURE")]
    pub temperature: f32,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_secret", &"<redacted>")
            .field("reply_format", &self.reply_format)
            .field("suggestion_count", &self.suggestion_count)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        check(
            Some(&self.api_secret),
            self.suggestion_count,
            Some(self.max_tokens),
            Some(self.temperature),
        )
        .map_err(Error::config)
    }

    /// Returns the reply strategy and completion parameters.
    pub fn reply_settings(&self) -> ReplySettings {
        let strategy = match self.suggestion_count {
            Some(count) => ReplyStrategy::new(self.reply_format, count),
            None => ReplyStrategy::from_format(self.reply_format),
        };

        ReplySettings {
            strategy,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Derives the caller secret used to authenticate requests.
    pub fn caller_secret(&self) -> Result<CallerSecret> {
        CallerSecret::new(&self.api_secret)
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        check(
            builder.api_secret.as_deref(),
            builder.suggestion_count.flatten(),
            builder.max_tokens,
            builder.temperature,
        )
    }
}

fn check(
    api_secret: Option<&str>,
    suggestion_count: Option<usize>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Result<(), String> {
    if let Some(secret) = api_secret
        && secret.trim().is_empty()
    {
        return Err("API secret cannot be empty".to_string());
    }

    if let Some(count) = suggestion_count
        && !(1..=MAX_SUGGESTION_COUNT).contains(&count)
    {
        return Err(format!(
            "Suggestion count must be between 1 and {MAX_SUGGESTION_COUNT}"
        ));
    }

    if max_tokens == Some(0) {
        return Err("Max tokens must be greater than 0".to_string());
    }

    if let Some(temperature) = temperature
        && !(0.0..=MAX_TEMPERATURE).contains(&temperature)
    {
        return Err(format!(
            "Temperature must be between 0 and {MAX_TEMPERATURE}"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = ServiceConfig::builder()
            .with_api_secret("s3cret")
            .build()
            .unwrap();

        assert_eq!(config.reply_format, ReplyFormat::Lines);
        assert_eq!(config.suggestion_count, None);
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.temperature, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_requires_secret() {
        assert!(ServiceConfig::builder().build().is_err());
        assert!(ServiceConfig::builder().with_api_secret("  ").build().is_err());
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        let builder = || ServiceConfig::builder().with_api_secret("s3cret");

        assert!(builder().with_suggestion_count(0usize).build().is_err());
        assert!(builder().with_suggestion_count(11usize).build().is_err());
        assert!(builder().with_max_tokens(0u32).build().is_err());
        assert!(builder().with_temperature(2.5f32).build().is_err());
        assert!(builder().with_temperature(-0.1f32).build().is_err());
    }

    #[test]
    fn reply_settings_follow_format() {
        let config = ServiceConfig::builder()
            .with_api_secret("s3cret")
            .build()
            .unwrap();
        let settings = config.reply_settings();
        assert_eq!(settings.strategy, ReplyStrategy::lines());
        assert_eq!(settings.strategy.count(), 4);

        let config = ServiceConfig::builder()
            .with_api_secret("s3cret")
            .with_reply_format(ReplyFormat::Json)
            .with_suggestion_count(3usize)
            .build()
            .unwrap();
        let settings = config.reply_settings();
        assert_eq!(settings.strategy.format(), ReplyFormat::Json);
        assert_eq!(settings.strategy.count(), 3);
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ServiceConfig::builder()
            .with_api_secret("s3cret")
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}

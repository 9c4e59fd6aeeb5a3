//! Application state and dependency injection.

mod config;
mod security;

use rizz_core::{AnnotationService, CompletionService, ReplyStrategy};

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::CallerSecret;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
use crate::TRACING_TARGET_SERVICE;

/// Completion settings shared by every suggestion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplySettings {
    /// Prompt format and parser, with the expected number of replies.
    pub strategy: ReplyStrategy,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Both upstream
/// services are optional: a missing annotation service degrades responses,
/// a missing completion service fails requests with `500`.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub annotation: Option<AnnotationService>,
    pub completion: Option<CompletionService>,

    // Internal services:
    pub caller_secret: CallerSecret,
    pub reply_settings: ReplySettings,
}

impl ServiceState {
    /// Initializes application state from configuration and the upstream services.
    pub fn from_config(
        service_config: &ServiceConfig,
        annotation: Option<AnnotationService>,
        completion: Option<CompletionService>,
    ) -> Result<Self> {
        service_config.validate()?;

        if annotation.is_none() {
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                "Annotation service is not configured, responses will carry no screenshot text"
            );
        }

        if completion.is_none() {
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                "Completion service is not configured, suggestion requests will fail"
            );
        }

        let service_state = Self {
            annotation,
            completion,

            caller_secret: service_config.caller_secret()?,
            reply_settings: service_config.reply_settings(),
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Internal services:
impl_di!(caller_secret: CallerSecret);
impl_di!(reply_settings: ReplySettings);

#[cfg(test)]
mod tests {
    use rizz_core::{MockCompletionProvider, ReplyFormat};

    use super::*;

    #[test]
    fn builds_state_from_config() {
        let config = ServiceConfig::builder()
            .with_api_secret("s3cret")
            .with_reply_format(ReplyFormat::Json)
            .build()
            .unwrap();

        let completion = MockCompletionProvider::default().into_service();
        let state = ServiceState::from_config(&config, None, Some(completion)).unwrap();

        assert!(state.annotation.is_none());
        assert!(state.completion.is_some());
        assert!(state.caller_secret.verify("s3cret"));
        assert_eq!(state.reply_settings.strategy.count(), 5);
        assert_eq!(state.reply_settings.max_tokens, 256);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ServiceConfig {
            api_secret: "   ".into(),
            ..ServiceConfig::builder().with_api_secret("x").build().unwrap()
        };

        let error = ServiceState::from_config(&config, None, None).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::Config);
    }
}

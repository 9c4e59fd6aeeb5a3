//! Middleware configuration for the HTTP server.
//!
//! Groups the CORS and recovery settings re-exported from `rizz-server`.
//!
//! # Example
//!
//! ```bash
//! rizz --cors-origins "https://example.com" --request-timeout 90
//! ```

use anyhow::anyhow;
use clap::Args;
use rizz_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Upper bound on the request timeout in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Middleware configuration combining CORS and recovery settings.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates the request timeout range.
    pub fn validate(&self) -> anyhow::Result<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT_SECS {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. \
                 Must be between 1 and {MAX_REQUEST_TIMEOUT_SECS} seconds."
            ));
        }

        if self.cors.allow_credentials && self.cors.allowed_origins.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "CORS credentials are ignored while any origin is allowed"
            );
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allows_credentials(),
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MiddlewareConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_invalid_request_timeouts() {
        let mut config = MiddlewareConfig::default();

        config.recovery = RecoveryConfig::with_timeout_secs(0);
        assert!(config.validate().is_err());

        config.recovery = RecoveryConfig::with_timeout_secs(301);
        assert!(config.validate().is_err());

        config.recovery = RecoveryConfig::with_timeout_secs(120);
        assert!(config.validate().is_ok());
    }
}

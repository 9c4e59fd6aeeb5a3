//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, TLS, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, recovery/timeouts
//! ├── service: ServiceConfig        # API secret, reply format, sampling
//! ├── vision: VisionConfig          # Google Cloud Vision key and timeout
//! ├── openai: OpenAiConfig          # Completion key, model and timeout
//! └── telemetry: TelemetryConfig    # Log output format
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! rizz --api-secret changeme --port 8080
//!
//! # Or via environment variables
//! RIZZ_API_SECRET=changeme PORT=8080 rizz
//! ```

mod middleware;
mod provider;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use middleware::MiddlewareConfig;
pub use provider::create_services;
use rizz_reqwest::{OpenAiConfig, VisionConfig};
use rizz_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "rizz")]
#[command(about = "Reply suggestions for chat screenshots")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Caller authentication and reply configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Google Cloud Vision configuration.
    #[clap(flatten)]
    pub vision: VisionConfig,

    /// OpenAI-compatible completion configuration.
    #[clap(flatten)]
    pub openai: OpenAiConfig,

    /// Log output configuration.
    #[clap(flatten)]
    pub telemetry: TelemetryConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so its variables
    /// act as defaults for the `env` fallbacks.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;

        let upstream = self.vision.timeout() + self.openai.timeout();
        if self.middleware.recovery.request_timeout() <= upstream {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                request_timeout_secs = self.middleware.recovery.request_timeout,
                upstream_timeout_secs = upstream.as_secs(),
                "Request timeout does not cover both upstream timeouts, slow calls fail instead of degrading"
            );
        }

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            reply_format = %self.service.reply_format,
            suggestion_count = ?self.service.suggestion_count,
            max_tokens = self.service.max_tokens,
            temperature = self.service.temperature,
            "Reply configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            vision_configured = self.vision.api_key().is_some(),
            vision_timeout_secs = self.vision.vision_timeout_secs,
            openai_configured = self.openai.api_key().is_some(),
            openai_model = %self.openai.openai_model,
            openai_timeout_secs = self.openai.openai_timeout_secs,
            "Upstream configuration"
        );
    }

    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting rizz server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

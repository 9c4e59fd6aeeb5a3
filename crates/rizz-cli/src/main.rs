#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use axum::Router;
use rizz_server::handler::routes;
use rizz_server::middleware::{
    RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt, SecurityHeadersConfig,
};
use rizz_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_services};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "rizz_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "rizz_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "rizz_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(&cli.telemetry)?;
    cli.log();
    cli.validate()?;

    let (annotation, completion) =
        create_services(&cli).context("failed to create upstream services")?;
    let state = ServiceState::from_config(&cli.service, annotation, completion)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    if let Err(error) = server::serve(router, cli.server).await {
        if let Some(suggestion) = error.suggestion() {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                code = error.error_code(),
                suggestion = suggestion,
                "Recovery suggestion"
            );
        }
        return Err(error.into());
    }

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost): catches panics and enforces timeouts
/// 2. Observability: request IDs and tracing spans
/// 3. Security: CORS, security headers, body limit
/// 4. Routes (innermost): authentication and the suggestion handler
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(state)
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_observability()
        .with_recovery(&middleware.recovery)
}

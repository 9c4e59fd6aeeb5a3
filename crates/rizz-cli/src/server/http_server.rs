//! HTTP server startup.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use super::lifecycle::serve_with_shutdown;
use super::{ServerError, ServerResult, shutdown_signal};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until shutdown.
///
/// In-flight requests get `shutdown_timeout` to complete once a shutdown
/// signal is received.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();
    let shutdown_timeout = server_config.shutdown_timeout();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );

        ServerError::Bind {
            address: server_addr.to_string(),
            source: err,
        }
    })?;

    serve_with_shutdown(&server_config, || async move {
        let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal(shutdown_timeout).await;
            let _ = drain_tx.send(());
        })
        .into_future();

        tokio::select! {
            result = server => result,
            () = drain_deadline(drain_rx, shutdown_timeout) => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok(())
            }
        }
    })
    .await
    .map_err(ServerError::Runtime)
}

/// Resolves `timeout` after the shutdown signal fired, never before.
async fn drain_deadline(signal: tokio::sync::oneshot::Receiver<()>, timeout: Duration) {
    if signal.await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(timeout).await;
}

//! HTTPS server startup.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;

use super::lifecycle::serve_with_shutdown;
use super::{ServerError, ServerResult, shutdown_signal};
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Loads the configured certificate and serves `app` over TLS until shutdown.
pub async fn serve_https(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let (Some(cert_path), Some(key_path)) = (
        server_config.tls_cert_path.clone(),
        server_config.tls_key_path.clone(),
    ) else {
        return Err(ServerError::TlsCertificate(
            "TLS_CERT_PATH and TLS_KEY_PATH are required when TLS is enabled".into(),
        ));
    };

    validate_tls_files(&cert_path, &key_path)?;

    let tls_config = RustlsConfig::from_pem_file(&cert_path, &key_path)
        .await
        .map_err(|e| ServerError::TlsCertificate(format!("Failed to load TLS certificates: {e}")))?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        cert_path = %cert_path.display(),
        key_path = %key_path.display(),
        "TLS certificates loaded successfully"
    );

    let server_addr = server_config.server_addr();
    let shutdown_timeout = server_config.shutdown_timeout();

    serve_with_shutdown(&server_config, move || async move {
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            shutdown_signal(shutdown_timeout).await;
            shutdown_handle.graceful_shutdown(Some(shutdown_timeout));
        });

        axum_server::bind_rustls(server_addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
    })
    .await
    .map_err(ServerError::Runtime)
}

fn validate_tls_files(cert_path: &Path, key_path: &Path) -> ServerResult<()> {
    let validate_file = |path: &Path, file_type: &str| -> ServerResult<()> {
        let metadata = std::fs::metadata(path).map_err(|err| {
            ServerError::TlsCertificate(format!(
                "Cannot read {file_type} file {}: {err}",
                path.display()
            ))
        })?;

        if !metadata.is_file() {
            return Err(ServerError::TlsCertificate(format!(
                "{file_type} path is not a file: {}",
                path.display()
            )));
        }

        if metadata.len() == 0 {
            return Err(ServerError::TlsCertificate(format!(
                "{file_type} file is empty: {}",
                path.display()
            )));
        }

        Ok(())
    };

    validate_file(cert_path, "certificate")?;
    validate_file(key_path, "private key")?;

    tracing::debug!(
        target: TRACING_TARGET_SERVER_STARTUP,
        cert_path = %cert_path.display(),
        key_path = %key_path.display(),
        "TLS files validated successfully"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_tls_files_rejects_nonexistent_files() {
        let result = validate_tls_files(
            Path::new("nonexistent_cert.pem"),
            Path::new("nonexistent_key.pem"),
        );

        let Err(ServerError::TlsCertificate(message)) = result else {
            panic!("expected a TLS certificate error");
        };
        assert!(message.contains("Cannot read certificate file"));
    }
}

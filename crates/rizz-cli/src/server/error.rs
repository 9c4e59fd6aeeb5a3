//! Server error types with recovery suggestions.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),

    /// TLS configuration error.
    #[error("TLS certificate error: {0}")]
    #[cfg_attr(not(feature = "tls"), allow(dead_code))]
    TlsCertificate(String),
}

impl ServerError {
    /// Returns a unique error code for this error type.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Bind { .. } => "E001",
            Self::Runtime(_) => "E002",
            Self::TlsCertificate(_) => "E003",
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Bind { source, .. } | Self::Runtime(source) => io_suggestion(source),
            Self::TlsCertificate(_) => {
                Some("Check that TLS_CERT_PATH and TLS_KEY_PATH point to readable PEM files")
            }
        }
    }
}

/// Suggestion for resolving an IO error.
fn io_suggestion(err: &io::Error) -> Option<&'static str> {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("Try using a port above 1024 or run with appropriate privileges")
        }
        io::ErrorKind::AddrInUse => {
            Some("The port is already in use. Try a different port or stop the conflicting service")
        }
        io::ErrorKind::AddrNotAvailable => {
            Some("The address is not available. Check network interface configuration")
        }
        io::ErrorKind::NotFound => Some("Check that the required files exist"),
        io::ErrorKind::InvalidData => {
            Some("Check that certificate files are in correct PEM format")
        }
        _ => None,
    }
}

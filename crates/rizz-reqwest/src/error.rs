//! Internal error types for rizz-reqwest.

use rizz_core::ErrorKind;
use thiserror::Error;

/// Result type alias for rizz-reqwest operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Internal error type for rizz-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },
    /// The remote API accepted the call but reported a failure in the body.
    #[error("{message}")]
    Rejected {
        message: String,
        details: Option<serde_json::Value>,
    },
    /// The remote API answered successfully but without a usable result.
    #[error("empty response")]
    EmptyResponse,
    /// The client configuration is incomplete.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Builds an [`Error::Api`] from a non-success status and the raw body.
    ///
    /// Both Google and OpenAI wrap failures as `{"error": {"message": ...}}`.
    pub(crate) fn api(status: reqwest::StatusCode, body: &str) -> Self {
        let details = serde_json::from_str::<serde_json::Value>(body).ok();
        let message = details
            .as_ref()
            .and_then(|value| value.pointer("/error/message"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned()
            });

        Self::Api {
            status: status.as_u16(),
            message,
            details,
        }
    }

    /// Converts into a provider error attributed to `service`.
    ///
    /// Request URLs are dropped from transport errors since they may carry API keys.
    pub fn into_core(self, service: &str) -> rizz_core::Error {
        match self {
            Self::Reqwest(e) => {
                let e = e.without_url();
                if e.is_timeout() {
                    let message = format!("{service}: request timed out");
                    rizz_core::Error::new(ErrorKind::Timeout, message).with_source(e)
                } else if e.is_connect() {
                    rizz_core::Error::network(service, "connection failed").with_source(e)
                } else if e.is_decode() {
                    rizz_core::Error::serialization(service, &e).with_source(e)
                } else {
                    rizz_core::Error::network(service, &e).with_source(e)
                }
            }
            Self::Serde(e) => rizz_core::Error::serialization(service, &e).with_source(e),
            Self::Api {
                status,
                message,
                details,
            } => {
                let error =
                    rizz_core::Error::external(service, format!("HTTP {status}: {message}"));
                match details {
                    Some(details) => error.with_details(details),
                    None => error,
                }
            }
            Self::Rejected { message, details } => {
                let error = rizz_core::Error::external(service, message);
                match details {
                    Some(details) => error.with_details(details),
                    None => error,
                }
            }
            Self::EmptyResponse => rizz_core::Error::external(service, "empty response"),
            Self::Config(message) => rizz_core::Error::config(format!("{service}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn api_error_extracts_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let error = Error::api(StatusCode::UNAUTHORIZED, body);

        let core = error.into_core("openai");
        assert_eq!(core.kind(), ErrorKind::External);
        assert_eq!(core.message(), "openai: HTTP 401: Incorrect API key provided");
        assert_eq!(
            core.details(),
            Some(&json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}))
        );
    }

    #[test]
    fn api_error_without_json_body() {
        let error = Error::api(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");

        let core = error.into_core("google-vision");
        assert_eq!(core.message(), "google-vision: HTTP 502: Bad Gateway");
        assert!(core.details().is_none());
        assert_eq!(core.to_json(), json!("google-vision: HTTP 502: Bad Gateway"));
    }

    #[test]
    fn config_error_kind() {
        let core = Error::Config("missing API key".into()).into_core("openai");
        assert_eq!(core.kind(), ErrorKind::Config);
    }
}

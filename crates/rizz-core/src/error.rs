//! Common error type definitions.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in provider operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Provider configuration is missing or invalid.
    Config,
    /// Input was rejected before reaching the provider.
    InvalidInput,
    /// Transport-level failure (connection refused, DNS, TLS).
    Network,
    /// The provider answered with an error payload.
    External,
    /// The provider did not answer in time.
    Timeout,
    /// The provider answer could not be decoded.
    Serialization,
    /// Unexpected internal failure.
    Internal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::InvalidInput => "invalid_input",
            Self::Network => "network",
            Self::External => "external_service",
            Self::Timeout => "timeout",
            Self::Serialization => "serialization",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error returned by annotation and completion providers.
///
/// Besides the kind and a human-readable message, an error may carry the
/// upstream error payload (`details`) exactly as the remote service sent it,
/// so callers can surface it without re-parsing.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    details: Option<serde_json::Value>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Attaches a source error.
    #[inline]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attaches the upstream error payload.
    #[inline]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the upstream error payload, if any.
    #[must_use]
    #[inline]
    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new invalid input error.
    #[inline]
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Creates a new network error for the named service.
    #[inline]
    pub fn network(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Network, format!("{service}: {message}"))
    }

    /// Creates a new external service error for the named service.
    #[inline]
    pub fn external(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::External, format!("{service}: {message}"))
    }

    /// Creates a new timeout error for the named service.
    #[inline]
    pub fn timeout(service: &str, after: Duration) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("{service}: no response within {}ms", after.as_millis()),
        )
    }

    /// Creates a new serialization error for the named service.
    #[inline]
    pub fn serialization(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Serialization, format!("{service}: {message}"))
    }

    /// Creates a new internal error.
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns the upstream payload if present, otherwise the message as a JSON string.
    ///
    /// This is the representation exposed to API callers.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match &self.details {
            Some(details) => details.clone(),
            None => serde_json::Value::String(self.message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_creation() {
        let error = Error::config("missing api key");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "missing api key");
        assert!(error.details().is_none());
    }

    #[test]
    fn error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::network("openai", "connection failed").with_source(source);

        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(error.to_string().contains("openai"));
    }

    #[test]
    fn timeout_error_mentions_duration() {
        let error = Error::timeout("google-vision", Duration::from_millis(1500));
        assert_eq!(error.kind(), ErrorKind::Timeout);
        assert!(error.message().contains("1500ms"));
    }

    #[test]
    fn to_json_prefers_details() {
        let payload = json!({ "error": { "message": "quota exceeded" } });
        let error = Error::external("openai", "HTTP 429").with_details(payload.clone());
        assert_eq!(error.to_json(), payload);

        let error = Error::external("openai", "HTTP 500");
        assert_eq!(error.to_json(), json!("openai: HTTP 500"));
    }

    #[test]
    fn error_kind_as_str() {
        assert_eq!(ErrorKind::Config.as_str(), "config");
        assert_eq!(ErrorKind::External.as_str(), "external_service");
        assert_eq!(ErrorKind::Timeout.as_str(), "timeout");
    }
}

//! HTTP error handling with builder pattern for dynamic error responses.
//!
//! Handlers return [`Error`] and let [`IntoResponse`] turn it into the
//! `{ "error": "..." }` body clients see. The context never leaves the
//! server: it is logged when the response is produced.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::TRACING_TARGET_HANDLER_ERROR;
use crate::handler::response::ErrorResponse;

/// The error type for HTTP handlers in the server.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches context information to the error.
    ///
    /// Context describes what went wrong for the logs and is not part of
    /// the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Replaces the client-facing message of the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Converts this error into a static version by cloning all borrowed data.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
            message: self.message.map(|m| Cow::Owned(m.into_owned())),
        }
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status)
            .field("message", &response.message);

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        if let Some(ref message) = self.message {
            debug_struct.field("custom_message", message);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        tracing::debug!(
            target: TRACING_TARGET_HANDLER_ERROR,
            name = %response.name,
            status = response.status.as_u16(),
            context = response.context.as_deref().unwrap_or_default(),
            "Responding with error"
        );

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of all HTTP error kinds the API produces.
///
/// Each variant corresponds to a specific HTTP status code and a fixed
/// client-facing message.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Missing or invalid request data
    BadRequest,
    /// 400 Bad Request - `image_base64` is not a usable image
    InvalidImageFormat,
    /// 403 Forbidden - Missing or wrong caller secret
    Unauthorized,
    /// 404 Not Found - Unknown route
    NotFound,
    /// 405 Method Not Allowed - Only POST is served
    MethodNotAllowed,

    // 5xx Server Errors
    /// 500 Internal Server Error - A required service is not configured
    MissingConfiguration,
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response template of this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::InvalidImageFormat => ErrorResponse::INVALID_IMAGE_FORMAT,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::MethodNotAllowed => ErrorResponse::METHOD_NOT_ALLOWED,
            Self::MissingConfiguration => ErrorResponse::MISSING_CONFIGURATION,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        Error::new(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_with_context() {
        let error = ErrorKind::BadRequest.with_context("missing field `vibe`");
        assert_eq!(error.context(), Some("missing field `vibe`"));
        assert_eq!(error.message(), None);
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::MissingConfiguration
            .with_message("Completion service is not configured")
            .with_context("OPENAI_API_KEY is unset");

        assert_eq!(error.kind(), ErrorKind::MissingConfiguration);
        assert_eq!(error.message(), Some("Completion service is not configured"));
        assert_eq!(error.context(), Some("OPENAI_API_KEY is unset"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::InvalidImageFormat.with_context("invalid base64 payload");

        let display = format!("{}", error);
        assert!(display.contains("invalid_image_format"));
        assert!(display.contains("400"));
        assert!(display.contains("Invalid image_base64 format"));
        assert!(display.contains("invalid base64 payload"));
    }

    #[test]
    fn std_fmt_debug() {
        let error = ErrorKind::Unauthorized.with_context("token mismatch");

        let debug = format!("{:?}", error);
        assert!(debug.contains("Unauthorized"));
        assert!(debug.contains("token mismatch"));
    }

    #[test]
    fn error_into_static() {
        let context = String::from("borrowed context");
        let error = ErrorKind::NotFound.with_context(context.as_str());

        let static_error = error.into_static();
        assert_eq!(static_error.context(), Some("borrowed context"));
    }

    #[test]
    fn status_codes_match_kinds() {
        let expected = [
            (ErrorKind::BadRequest, StatusCode::BAD_REQUEST),
            (ErrorKind::InvalidImageFormat, StatusCode::BAD_REQUEST),
            (ErrorKind::Unauthorized, StatusCode::FORBIDDEN),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (ErrorKind::MissingConfiguration, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorKind::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (kind, status) in expected {
            assert_eq!(kind.status_code(), status, "{kind:?}");
            assert!(!kind.response().name.is_empty());
            assert_eq!(kind.into_response().status(), status);
        }
    }
}

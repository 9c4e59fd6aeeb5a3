use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response representation.
///
/// Only the message is serialized, as `{ "error": "..." }`. The name,
/// context and status stay on the server side for logging and routing.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier (not serialized in JSON)
    #[serde(skip)]
    pub name: Cow<'a, str>,
    /// User-friendly error message safe for client display
    #[serde(rename = "error")]
    pub message: Cow<'a, str>,
    /// Internal context for debugging (not serialized in JSON)
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Bad Request: Missing or invalid input",
        StatusCode::BAD_REQUEST,
    );
    pub const INVALID_IMAGE_FORMAT: Self = Self::new(
        "invalid_image_format",
        "Invalid image_base64 format",
        StatusCode::BAD_REQUEST,
    );
    pub const METHOD_NOT_ALLOWED: Self = Self::new(
        "method_not_allowed",
        "Only POST requests allowed",
        StatusCode::METHOD_NOT_ALLOWED,
    );
    pub const NOT_FOUND: Self = Self::new("not_found", "Not Found", StatusCode::NOT_FOUND);
    pub const UNAUTHORIZED: Self =
        Self::new("unauthorized", "Unauthorized", StatusCode::FORBIDDEN);

    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal Server Error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MISSING_CONFIGURATION: Self = Self::new(
        "missing_configuration",
        "Server misconfiguration: completion service is not configured",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the client-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

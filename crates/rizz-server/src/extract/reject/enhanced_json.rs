//! JSON extractor with API-specific error handling.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// JSON extractor rejecting with [`Error`] instead of plain text.
///
/// Deserialization, syntax, content-type and body errors all become
/// [`ErrorKind::BadRequest`]. The body size limit is enforced by the
/// security middleware.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Creates a new [`Json`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest.with_context(format!(
                "JSON deserialization failed: {}",
                sanitize_error_message(&err.body_text())
            )),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest.with_context(format!(
                "JSON parsing failed: {}",
                sanitize_error_message(&err.body_text())
            )),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_context("Content-Type header must be set to 'application/json'"),
            JsonRejection::BytesRejection(err) => ErrorKind::BadRequest.with_context(format!(
                "Request body processing failed: {}",
                sanitize_error_message(&err.body_text())
            )),
            rejection => ErrorKind::InternalServerError.with_context(format!(
                "Unexpected error during JSON request body processing: {:?}",
                rejection
            )),
        }
    }
}

/// Keeps error messages short enough for a single log line.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_long_messages() {
        let message = format!("{}\nsecond\nthird\nfourth", "x".repeat(300));
        let sanitized = sanitize_error_message(&message);
        assert_eq!(sanitized.chars().count(), 200);
        assert!(!sanitized.contains("fourth"));
    }
}

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};
use crate::service::CallerSecret;

/// Proof that the request carried the configured bearer secret.
///
/// Missing, malformed and mismatching credentials are all rejected with
/// `403 Forbidden` and the same body, so callers cannot tell them apart.
///
/// ```rust,ignore
/// async fn handler(_: CallerAuth) -> &'static str {
///     "authenticated"
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerAuth;

impl<S> FromRequestParts<S> for CallerAuth
where
    S: Sync + Send,
    CallerSecret: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.extensions.get::<Self>().is_some() {
            return Ok(Self);
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let caller_secret = CallerSecret::from_ref(state);

        let bearer = match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(rejection) => {
                let context = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => "Missing Authorization header",
                    _ => "Authorization header must contain a Bearer token",
                };

                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    method = %parts.method,
                    path = %parts.uri.path(),
                    reason = context,
                    "Rejected unauthenticated request"
                );

                return Err(ErrorKind::Unauthorized.with_context(context));
            }
        };

        if !caller_secret.verify(bearer.token()) {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                method = %parts.method,
                path = %parts.uri.path(),
                "Rejected request with invalid bearer token"
            );

            return Err(ErrorKind::Unauthorized.with_context("Bearer token does not match"));
        }

        parts.extensions.insert(Self);
        Ok(Self)
    }
}

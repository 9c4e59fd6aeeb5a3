//! Authentication middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::CallerAuth;

/// Middleware that requires the caller secret.
///
/// The [`CallerAuth`] extractor rejects the request with `403 Forbidden`
/// before the handler runs, so nothing downstream is invoked for
/// unauthenticated callers.
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
///
/// let routes = post(handler)
///     .route_layer(from_fn_with_state(state, require_authentication));
/// ```
pub async fn require_authentication(
    _caller: CallerAuth,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}

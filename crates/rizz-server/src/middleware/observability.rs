//! Observability middleware for request IDs and tracing.

use axum::Router;
use axum::http::header;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request ID, set when absent and echoed in responses.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates a request ID when the caller did not send one, opens a
    /// tracing span for each request, propagates the ID to the response and
    /// redacts the `Authorization` header in logs.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::post;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn generates_and_propagates_request_ids() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", post(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.post("/").await;
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = server
            .post("/")
            .add_header(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                header::HeaderValue::from_static("abc-123"),
            )
            .await;
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER),
            Some(&header::HeaderValue::from_static("abc-123"))
        );
        Ok(())
    }
}

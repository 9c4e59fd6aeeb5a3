//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,no_run
//! use rizz_core::MockCompletionProvider;
//! use rizz_server::handler::routes;
//! use rizz_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::builder().with_api_secret("s3cret").build()?;
//! let completion = MockCompletionProvider::new("hey").into_service();
//! let state = ServiceState::from_config(&config, None, Some(completion))?;
//!
//! let router = routes(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod request;
mod response;
mod suggestions;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::SuggestionRequest;
pub use crate::handler::response::{ErrorResponse, SuggestionResponse};
pub use crate::handler::suggestions::SUGGESTIONS_PATH;
use crate::service::ServiceState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes, ready to be served.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(suggestions::routes(state.clone()))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test {
    use axum_test::TestServer;
    use rizz_core::{
        AnnotationService, MockAnnotationProvider, MockCompletionProvider, ReplyFormat,
    };

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Secret the test servers are configured with.
    pub const API_SECRET: &str = "test-secret";

    /// Mock providers shared between a test and the server under test.
    pub struct TestServices {
        pub annotation: MockAnnotationProvider,
        pub completion: MockCompletionProvider,
    }

    impl TestServices {
        pub fn new(annotation: MockAnnotationProvider, completion: MockCompletionProvider) -> Self {
            Self {
                annotation,
                completion,
            }
        }

        /// Builds a state with the given annotation service and the mock completion.
        pub fn state_with(
            &self,
            annotation: Option<AnnotationService>,
            reply_format: ReplyFormat,
        ) -> anyhow::Result<ServiceState> {
            let config = ServiceConfig::builder()
                .with_api_secret(API_SECRET)
                .with_reply_format(reply_format)
                .build()?;

            let completion = self.completion.clone().into_service();
            let state = ServiceState::from_config(&config, annotation, Some(completion))?;
            Ok(state)
        }
    }

    /// Returns a new [`TestServer`] with the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let server = TestServer::new(routes(state))?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] backed by the given mocks.
    pub fn create_test_server(
        services: &TestServices,
        reply_format: ReplyFormat,
    ) -> anyhow::Result<TestServer> {
        let annotation = services.annotation.clone().into_service();
        let state = services.state_with(Some(annotation), reply_format)?;
        create_test_server_with_state(state)
    }

    #[tokio::test]
    async fn unknown_paths_return_not_found() -> anyhow::Result<()> {
        let services = TestServices::new(
            MockAnnotationProvider::default(),
            MockCompletionProvider::default(),
        );
        let server = create_test_server(&services, ReplyFormat::Lines)?;

        let response = server.post("/api/unknown").await;
        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "error": "Not Found" }));
        Ok(())
    }
}

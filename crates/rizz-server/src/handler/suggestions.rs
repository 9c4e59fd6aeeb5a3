//! Reply suggestion handler.
//!
//! `POST /api/rizz` annotates the screenshot, builds the prompt, asks the
//! completion service for replies and shapes the answer. Upstream failures
//! degrade the response instead of failing it: annotation errors leave the
//! text and labels empty, completion and parse errors yield placeholders.

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use rizz_core::{AnnotationRequest, AnnotationResult, CompletionRequest, PromptBuilder};
use serde_json::Value;

use crate::TRACING_TARGET_SUGGESTIONS;
use crate::extract::{Json, ValidateJson};
use crate::handler::request::SuggestionRequest;
use crate::handler::response::SuggestionResponse;
use crate::handler::{ErrorKind, Result};
use crate::middleware::require_authentication;
use crate::service::{ReplySettings, ServiceState};

/// Path of the suggestion endpoint.
pub const SUGGESTIONS_PATH: &str = "/api/rizz";

/// Suggests short replies for a chat screenshot.
#[tracing::instrument(skip_all)]
async fn suggest_replies(
    State(service_state): State<ServiceState>,
    ValidateJson(request): ValidateJson<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>> {
    let image = request.image_source()?;

    let Some(completion) = service_state.completion.as_ref() else {
        tracing::error!(
            target: TRACING_TARGET_SUGGESTIONS,
            "Completion service is not configured"
        );

        return Err(ErrorKind::MissingConfiguration
            .with_context("completion API key is not configured"));
    };

    tracing::debug!(
        target: TRACING_TARGET_SUGGESTIONS,
        vibe = %request.vibe,
        language = %request.language,
        image = image.kind(),
        history_len = request.conversation_history.len(),
        "Suggestion request accepted"
    );

    let (annotation, annotation_error) = match service_state.annotation.as_ref() {
        Some(service) => match service.annotate(&AnnotationRequest::new(image)).await {
            Ok(annotation) => (annotation, None),
            Err(error) => (AnnotationResult::default(), Some(error.message().to_owned())),
        },
        None => (
            AnnotationResult::default(),
            Some("Annotation service is not configured".to_owned()),
        ),
    };

    let ReplySettings {
        strategy,
        max_tokens,
        temperature,
    } = service_state.reply_settings;

    let prompt = PromptBuilder::new(request.vibe, &request.language)
        .with_full_text(&annotation.full_text)
        .with_labels(&annotation.labels)
        .with_conversation_history(&request.conversation_history)
        .build(&strategy);

    let completion_request = CompletionRequest::new(prompt.clone())
        .with_max_tokens(max_tokens)
        .with_temperature(temperature);

    let (suggestions, openai_error) = match completion.complete(&completion_request).await {
        Ok(response) => match strategy.parse(&response.text) {
            Ok(suggestions) => (suggestions, None),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_SUGGESTIONS,
                    error = %error,
                    format = %strategy.format(),
                    "Completion could not be parsed, returning placeholders"
                );
                (strategy.placeholders(), Some(Value::String(error.to_string())))
            }
        },
        Err(error) => (strategy.placeholders(), Some(error.to_json())),
    };

    tracing::info!(
        target: TRACING_TARGET_SUGGESTIONS,
        suggestions = suggestions.len(),
        labels = annotation.labels.len(),
        annotation_failed = annotation_error.is_some(),
        completion_failed = openai_error.is_some(),
        "Suggestions prepared"
    );

    Ok(Json(SuggestionResponse {
        suggestions,
        full_text: annotation.full_text,
        labels: annotation.labels,
        prompt,
        openai_error,
        annotation_error,
    }))
}

/// Answers every method other than POST on the suggestion path.
async fn method_not_allowed() -> Response {
    ([(header::ALLOW, "POST")], ErrorKind::MethodNotAllowed).into_response()
}

/// Returns a [`Router`] with the suggestion route.
///
/// Authentication runs only for POST, so other methods get `405` whether or
/// not credentials were sent.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    let method_router = post(suggest_replies)
        .route_layer(require_authentication)
        .fallback(method_not_allowed);

    Router::new().route(SUGGESTIONS_PATH, method_router)
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful answer of the suggestion endpoint.
///
/// `openaiError` and `annotationError` are always present and `null` when the
/// matching stage succeeded.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Reply suggestions, or placeholders when the completion failed.
    pub suggestions: Vec<String>,
    /// Text detected in the screenshot.
    pub full_text: String,
    /// Labels detected in the screenshot, at most five.
    pub labels: Vec<String>,
    /// The prompt sent to the completion service.
    pub prompt: String,
    /// Upstream completion error payload, or its message.
    pub openai_error: Option<Value>,
    /// Message of the annotation failure.
    pub annotation_error: Option<String>,
}

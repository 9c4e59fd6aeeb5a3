//! Suggestion request types.

use rizz_core::{ImageError, ImageSource, Vibe};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::handler::{ErrorKind, Result};

/// Request payload for reply suggestions.
///
/// Exactly one of `image_base64` and `imageUrl` must be present.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_image_fields"))]
pub struct SuggestionRequest {
    /// Screenshot as a `data:image/...;base64,` URL or a bare base64 string.
    #[serde(default, alias = "imageBase64", skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,

    /// Publicly reachable screenshot URL.
    #[serde(
        default,
        rename = "imageUrl",
        alias = "image_url",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,

    /// Requested tone of the replies.
    pub vibe: Vibe,

    /// Conversation so far, may be empty.
    #[serde(alias = "conversationHistory")]
    #[validate(length(max = 20000))]
    pub conversation_history: String,

    /// Language the replies are written in.
    #[validate(length(min = 1, max = 64))]
    pub language: String,
}

impl SuggestionRequest {
    /// Resolves the image reference.
    ///
    /// A malformed `image_base64` is reported as [`ErrorKind::InvalidImageFormat`],
    /// an unusable `imageUrl` as a generic [`ErrorKind::BadRequest`].
    pub fn image_source(&self) -> Result<ImageSource> {
        match (&self.image_base64, &self.image_url) {
            (Some(data), None) => ImageSource::from_base64(data).map_err(|error| {
                ErrorKind::InvalidImageFormat
                    .with_context(error.to_string())
                    .into_static()
            }),
            (None, Some(url)) => ImageSource::from_url(url).map_err(|error: ImageError| {
                ErrorKind::BadRequest
                    .with_context(error.to_string())
                    .into_static()
            }),
            _ => Err(ErrorKind::BadRequest
                .with_context("exactly one of image_base64 or imageUrl is required")),
        }
    }
}

fn validate_image_fields(request: &SuggestionRequest) -> Result<(), ValidationError> {
    match (&request.image_base64, &request.image_url) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (None, None) => Err(image_error("image_missing", "An image is required")),
        (Some(_), Some(_)) => Err(image_error(
            "image_ambiguous",
            "Only one of image_base64 and imageUrl may be set",
        )),
    }
}

fn image_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn parse(value: serde_json::Value) -> SuggestionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_base64_request() {
        let request = parse(json!({
            "image_base64": format!("data:image/png;base64,{PNG}"),
            "vibe": "over-the-top",
            "conversation_history": "",
            "language": "English",
        }));

        assert!(request.validate().is_ok());
        assert_eq!(request.vibe, Vibe::OverTheTop);
        assert_eq!(request.image_source().unwrap().mime_type(), Some("image/png"));
    }

    #[test]
    fn accepts_url_request() {
        let request = parse(json!({
            "imageUrl": "https://example.com/chat.png",
            "vibe": "casual",
            "conversation_history": "hey",
            "language": "Deutsch",
        }));

        assert!(request.validate().is_ok());
        assert_eq!(request.image_source().unwrap().kind(), "url");
    }

    #[test]
    fn rejects_unknown_vibe() {
        let result = serde_json::from_value::<SuggestionRequest>(json!({
            "imageUrl": "https://example.com/chat.png",
            "vibe": "sarcastic",
            "conversation_history": "",
            "language": "English",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_or_duplicate_image() {
        let missing = parse(json!({
            "vibe": "formal",
            "conversation_history": "",
            "language": "English",
        }));
        assert!(missing.validate().is_err());
        assert_eq!(missing.image_source().unwrap_err().kind(), ErrorKind::BadRequest);

        let both = parse(json!({
            "image_base64": PNG,
            "imageUrl": "https://example.com/chat.png",
            "vibe": "formal",
            "conversation_history": "",
            "language": "English",
        }));
        assert!(both.validate().is_err());
    }

    #[test]
    fn rejects_empty_language() {
        let request = parse(json!({
            "image_base64": PNG,
            "vibe": "flirty",
            "conversation_history": "",
            "language": "",
        }));

        assert!(request.validate().is_err());
    }

    #[test]
    fn malformed_base64_maps_to_image_format_error() {
        let request = parse(json!({
            "image_base64": "data:image/png,not-base64",
            "vibe": "dirty",
            "conversation_history": "",
            "language": "English",
        }));

        let error = request.image_source().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidImageFormat);
    }

    #[test]
    fn unsupported_url_maps_to_bad_request() {
        let request = parse(json!({
            "imageUrl": "file:///etc/passwd",
            "vibe": "formal",
            "conversation_history": "",
            "language": "English",
        }));

        assert_eq!(request.image_source().unwrap_err().kind(), ErrorKind::BadRequest);
    }
}

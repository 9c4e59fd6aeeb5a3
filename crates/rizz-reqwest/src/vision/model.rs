//! Wire types for `v1/images:annotate`.

use rizz_core::{AnnotationResult, ImageSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImagesRequest<'a> {
    pub requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImageRequest<'a> {
    pub image: VisionImage<'a>,
    pub features: [Feature; 2],
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum VisionImage<'a> {
    Content { content: &'a str },
    Source { source: ImageUri<'a> },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageUri<'a> {
    pub image_uri: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl<'a> AnnotateImagesRequest<'a> {
    /// Text detection plus label detection capped at `max_labels`.
    pub fn new(image: &'a ImageSource, max_labels: u32) -> Self {
        let image = match image {
            ImageSource::Inline { data, .. } => VisionImage::Content { content: data },
            ImageSource::Url { url } => VisionImage::Source {
                source: ImageUri {
                    image_uri: url.as_str(),
                },
            },
        };

        Self {
            requests: [AnnotateImageRequest {
                image,
                features: [
                    Feature {
                        kind: "TEXT_DETECTION",
                        max_results: None,
                    },
                    Feature {
                        kind: "LABEL_DETECTION",
                        max_results: Some(max_labels),
                    },
                ],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    pub full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    pub label_annotations: Vec<EntityAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextAnnotation {
    #[serde(default)]
    pub text: String,
}

/// Per-image error embedded in an otherwise successful batch response.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl AnnotateImageResponse {
    /// Prefers the structured full text and falls back to the first text annotation,
    /// which Vision documents as the whole detected text.
    pub fn into_result(self) -> AnnotationResult {
        let full_text = self
            .full_text_annotation
            .map(|annotation| annotation.text)
            .filter(|text| !text.trim().is_empty())
            .or_else(|| {
                self.text_annotations
                    .into_iter()
                    .next()
                    .map(|annotation| annotation.description)
            })
            .unwrap_or_default();

        let labels = self
            .label_annotations
            .into_iter()
            .map(|label| label.description)
            .filter(|label| !label.is_empty())
            .collect();

        AnnotationResult::new(full_text.trim_end().to_owned(), labels)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_with_inline_content() {
        let image = ImageSource::Inline {
            mime_type: Some("image/png".into()),
            data: "aGVsbG8=".into(),
        };
        let body = serde_json::to_value(AnnotateImagesRequest::new(&image, 5)).unwrap();
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "image": { "content": "aGVsbG8=" },
                    "features": [
                        { "type": "TEXT_DETECTION" },
                        { "type": "LABEL_DETECTION", "maxResults": 5 }
                    ]
                }]
            })
        );
    }

    #[test]
    fn request_with_image_uri() {
        let image = ImageSource::from_url("https://example.com/chat.png").unwrap();
        let body = serde_json::to_value(AnnotateImagesRequest::new(&image, 5)).unwrap();
        assert_eq!(
            body["requests"][0]["image"],
            json!({ "source": { "imageUri": "https://example.com/chat.png" } })
        );
    }

    #[test]
    fn response_falls_back_to_text_annotations() {
        let response: AnnotateImageResponse = serde_json::from_value(json!({
            "textAnnotations": [
                { "description": "see you at 8?\n", "locale": "en" },
                { "description": "see" }
            ],
            "labelAnnotations": [
                { "description": "Text", "score": 0.98 },
                { "description": "Screenshot", "score": 0.91 }
            ]
        }))
        .unwrap();

        let result = response.into_result();
        assert_eq!(result.full_text, "see you at 8?");
        assert_eq!(result.labels, vec!["Text", "Screenshot"]);
    }

    #[test]
    fn response_prefers_full_text_annotation() {
        let response: AnnotateImageResponse = serde_json::from_value(json!({
            "fullTextAnnotation": { "text": "hey there\nhow are you\n" },
            "textAnnotations": [{ "description": "ignored" }]
        }))
        .unwrap();

        let result = response.into_result();
        assert_eq!(result.full_text, "hey there\nhow are you");
        assert!(result.labels.is_empty());
    }

    #[test]
    fn empty_response_yields_empty_result() {
        let result = AnnotateImageResponse::default().into_result();
        assert!(result.is_empty());
    }
}

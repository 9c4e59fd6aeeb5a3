use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use url::Url;

/// MIME types accepted in `data:` URLs.
const SUPPORTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/heic",
    "image/heif",
    "image/tiff",
];

/// Reasons an image reference is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// A `data:` prefix was present but the rest is not `<mime>;base64,<payload>`.
    #[error("malformed data URL, expected data:<mime>;base64,<payload>")]
    MalformedDataUrl,
    /// The declared MIME type is not an accepted image type.
    #[error("unsupported image type: {0}")]
    UnsupportedMimeType(String),
    /// The base64 payload is empty or decodes to nothing.
    #[error("image payload is empty")]
    EmptyPayload,
    /// The payload is not valid standard base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The URL could not be parsed.
    #[error("invalid image URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Only `http` and `https` URLs can be fetched by the annotation service.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// A normalized image reference handed to the annotation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Inline base64 content, with the MIME type when it was declared.
    Inline {
        mime_type: Option<String>,
        data: String,
    },
    /// Publicly reachable image URL.
    Url { url: Url },
}

impl ImageSource {
    /// Parses an `image_base64` value.
    ///
    /// Accepts either a data URL (`data:image/png;base64,...`) with a supported
    /// image MIME type, or a bare base64 string. The payload must decode to at
    /// least one byte.
    pub fn from_base64(value: &str) -> Result<Self, ImageError> {
        let value = value.trim();

        let Some(rest) = value.strip_prefix("data:") else {
            validate_payload(value)?;
            return Ok(Self::Inline {
                mime_type: None,
                data: value.to_owned(),
            });
        };

        let (header, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(ImageError::MalformedDataUrl)?
            .to_ascii_lowercase();

        if !SUPPORTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(ImageError::UnsupportedMimeType(mime_type));
        }

        validate_payload(payload)?;
        Ok(Self::Inline {
            mime_type: Some(mime_type),
            data: payload.to_owned(),
        })
    }

    /// Parses an `imageUrl` value. Only absolute `http(s)` URLs are accepted.
    pub fn from_url(value: &str) -> Result<Self, ImageError> {
        let url = Url::parse(value.trim())?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Self::Url { url }),
            scheme => Err(ImageError::UnsupportedScheme(scheme.to_owned())),
        }
    }

    /// Returns the declared MIME type of inline content.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Inline { mime_type, .. } => mime_type.as_deref(),
            Self::Url { .. } => None,
        }
    }

    /// Returns a short label for logs that never includes the payload.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline { .. } => "inline",
            Self::Url { .. } => "url",
        }
    }

    /// Returns the size of the inline payload in base64 characters.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        match self {
            Self::Inline { data, .. } => data.len(),
            Self::Url { url } => url.as_str().len(),
        }
    }
}

fn validate_payload(payload: &str) -> Result<(), ImageError> {
    if payload.is_empty() {
        return Err(ImageError::EmptyPayload);
    }

    let decoded = STANDARD.decode(payload)?;
    if decoded.is_empty() {
        return Err(ImageError::EmptyPayload);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG.
    const PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn accepts_data_url() {
        let source = ImageSource::from_base64(&format!("data:image/png;base64,{PNG}")).unwrap();
        assert_eq!(source.mime_type(), Some("image/png"));
        assert_eq!(
            source,
            ImageSource::Inline {
                mime_type: Some("image/png".into()),
                data: PNG.into(),
            }
        );
    }

    #[test]
    fn accepts_raw_base64() {
        let source = ImageSource::from_base64(PNG).unwrap();
        assert_eq!(source.mime_type(), None);
        assert_eq!(source.kind(), "inline");
    }

    #[test]
    fn normalizes_mime_case() {
        let source = ImageSource::from_base64(&format!("data:IMAGE/JPEG;base64,{PNG}")).unwrap();
        assert_eq!(source.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn rejects_data_url_without_base64_marker() {
        let result = ImageSource::from_base64(&format!("data:image/png,{PNG}"));
        assert!(matches!(result, Err(ImageError::MalformedDataUrl)));
    }

    #[test]
    fn rejects_data_url_without_comma() {
        let result = ImageSource::from_base64("data:image/png;base64");
        assert!(matches!(result, Err(ImageError::MalformedDataUrl)));
    }

    #[test]
    fn rejects_non_image_mime() {
        let result = ImageSource::from_base64(&format!("data:text/plain;base64,{PNG}"));
        assert!(matches!(result, Err(ImageError::UnsupportedMimeType(mime)) if mime == "text/plain"));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            ImageSource::from_base64("data:image/png;base64,"),
            Err(ImageError::EmptyPayload)
        ));
        assert!(matches!(ImageSource::from_base64(""), Err(ImageError::EmptyPayload)));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            ImageSource::from_base64("not base64 at all!"),
            Err(ImageError::InvalidBase64(_))
        ));
        assert!(matches!(
            ImageSource::from_base64("data:image/png;base64,@@@@"),
            Err(ImageError::InvalidBase64(_))
        ));
    }

    #[test]
    fn accepts_http_urls() {
        let source = ImageSource::from_url("https://example.com/chat.png").unwrap();
        assert_eq!(source.kind(), "url");
        assert_eq!(source.mime_type(), None);
    }

    #[test]
    fn rejects_other_url_schemes() {
        assert!(matches!(
            ImageSource::from_url("ftp://example.com/chat.png"),
            Err(ImageError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            ImageSource::from_url("not a url"),
            Err(ImageError::InvalidUrl(_))
        ));
    }
}

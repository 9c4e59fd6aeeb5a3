//! Image annotation: text detection (OCR) and label detection.
//!
//! Implement [`AnnotationProvider`] for a concrete backend and wrap it in an
//! [`AnnotationService`] to get timeouts and structured logging:
//!
//! ```rust,ignore
//! use rizz_core::annotation::{AnnotationRequest, AnnotationService};
//!
//! let service = AnnotationService::from_provider(my_provider)
//!     .with_timeout(Duration::from_secs(15));
//! let result = service.annotate(&AnnotationRequest::new(image)).await?;
//! ```

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod service;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockAnnotationProvider;
use serde::{Deserialize, Serialize};
pub use service::AnnotationService;
use uuid::Uuid;

use crate::types::ImageSource;
pub use crate::{Error, Result};

/// Tracing target for annotation operations.
pub const TRACING_TARGET: &str = "rizz_core::annotation";

/// Default number of labels requested from the provider.
pub const DEFAULT_MAX_LABELS: u32 = 5;

/// Backend capable of extracting text and descriptive labels from an image.
#[async_trait::async_trait]
pub trait AnnotationProvider: Send + Sync {
    /// Runs text and label detection on the requested image.
    async fn annotate(&self, request: &AnnotationRequest) -> Result<AnnotationResult>;
}

/// A single annotation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRequest {
    /// Identifier used to correlate logs of one call.
    pub request_id: Uuid,
    /// The image to annotate.
    pub image: ImageSource,
    /// Upper bound on the number of labels returned.
    pub max_labels: u32,
}

impl AnnotationRequest {
    /// Creates a request for the given image with the default label budget.
    pub fn new(image: ImageSource) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            image,
            max_labels: DEFAULT_MAX_LABELS,
        }
    }

    /// Overrides the label budget.
    pub fn with_max_labels(mut self, max_labels: u32) -> Self {
        self.max_labels = max_labels;
        self
    }
}

/// Text and labels detected in one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResult {
    /// All text found in the image, possibly empty.
    pub full_text: String,
    /// Descriptive labels ordered by confidence.
    pub labels: Vec<String>,
}

impl AnnotationResult {
    /// Creates a new result.
    pub fn new(full_text: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            full_text: full_text.into(),
            labels,
        }
    }

    /// Returns `true` when neither text nor labels were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty() && self.labels.is_empty()
    }
}

//! Commonly used items from rizz-core.
//!
//! ```rust,ignore
//! use rizz_core::prelude::*;
//! ```

pub use crate::annotation::{
    AnnotationProvider, AnnotationRequest, AnnotationResult, AnnotationService,
};
pub use crate::completion::{
    CompletionProvider, CompletionRequest, CompletionResponse, CompletionService,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::reply::{PromptBuilder, ReplyFormat, ReplyStrategy};
pub use crate::types::{ImageSource, Vibe};

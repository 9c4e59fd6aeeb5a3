#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod annotation;
pub mod completion;
#[doc(hidden)]
pub mod prelude;
pub mod reply;
pub mod types;

pub use crate::annotation::{
    AnnotationProvider, AnnotationRequest, AnnotationResult, AnnotationService,
};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use crate::annotation::MockAnnotationProvider;
pub use crate::completion::{
    CompletionProvider, CompletionRequest, CompletionResponse, CompletionService,
};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use crate::completion::MockCompletionProvider;
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::reply::{ParseError, PromptBuilder, ReplyFormat, ReplyStrategy};
pub use crate::types::{ImageError, ImageSource, Vibe};

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod openai;
pub mod vision;

pub use crate::error::{Error, Result};
pub use crate::openai::{OpenAiClient, OpenAiConfig};
pub use crate::vision::{VisionClient, VisionConfig};

/// User agent sent with every outbound request.
pub(crate) fn user_agent() -> String {
    format!("rizz/{}", env!("CARGO_PKG_VERSION"))
}

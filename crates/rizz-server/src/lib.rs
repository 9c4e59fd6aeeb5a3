#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod utility;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::utility::{
    TRACING_TARGET_AUTHENTICATION, TRACING_TARGET_HANDLER_ERROR, TRACING_TARGET_RECOVERY_ERROR,
    TRACING_TARGET_RECOVERY_PANIC, TRACING_TARGET_SERVICE, TRACING_TARGET_SUGGESTIONS,
};

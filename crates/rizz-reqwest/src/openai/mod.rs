//! OpenAI-compatible chat completion provider.

mod client;
mod config;
mod model;

pub use client::{OpenAiClient, TRACING_TARGET};
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OpenAiConfig};

//! Google Cloud Vision annotation provider.

mod client;
mod config;
mod model;

pub use client::{TRACING_TARGET, VisionClient};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, VisionConfig};

//! HTTP request extractors with API-specific error handling.
//!
//! - [`Json`] - JSON deserialization that rejects with the API error body
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`CallerAuth`] - bearer token checked against the configured secret

// Authentication
pub mod auth;

// Request Data Extraction
pub mod reject;

pub use crate::extract::auth::CallerAuth;
pub use crate::extract::reject::{Json, ValidateJson};

//! Centralized tracing target constants for structured logging.
//!
//! Filter on these with `RUST_LOG`, e.g. `RUST_LOG=rizz_server::suggestions=debug`.

/// Caller authentication against the configured secret.
pub const TRACING_TARGET_AUTHENTICATION: &str = "rizz_server::authentication";

/// The reply-suggestion handler.
pub const TRACING_TARGET_SUGGESTIONS: &str = "rizz_server::suggestions";

/// Error responses produced by handlers and extractors.
pub const TRACING_TARGET_HANDLER_ERROR: &str = "rizz_server::handler::error";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "rizz_server::recovery::error";

/// Panic recovery including handler panics and service failures.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "rizz_server::recovery::panic";

/// Application state assembly and configuration checks.
pub const TRACING_TARGET_SERVICE: &str = "rizz_server::service";

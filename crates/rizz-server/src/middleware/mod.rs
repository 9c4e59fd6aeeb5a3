//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication against the caller secret
//! - Security (CORS, headers, body limits, compression)
//! - Observability (request IDs, tracing)
//! - Recovery (panics, timeouts, service errors)
//!
//! ```rust,no_run
//! use axum::Router;
//! use rizz_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt, SecurityHeadersConfig,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod auth;
mod observability;
mod recovery;
pub mod security;

pub use auth::require_authentication;
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt, SecurityHeadersConfig};

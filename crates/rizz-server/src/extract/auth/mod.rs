//! Caller authentication.
//!
//! The API has a single shared secret. Callers present it as a bearer token
//! and [`CallerAuth`] compares it in constant time against the configured
//! [`CallerSecret`].
//!
//! [`CallerSecret`]: crate::service::CallerSecret

mod caller;

pub use self::caller::CallerAuth;

//! Response types for HTTP handlers.

mod error_response;
mod suggestion;

pub use error_response::ErrorResponse;
pub use suggestion::SuggestionResponse;

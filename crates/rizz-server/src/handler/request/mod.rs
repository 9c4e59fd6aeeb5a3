//! Request types for HTTP handlers.

mod suggestion;

pub use suggestion::SuggestionRequest;

//! Request body extractors whose rejections use the API error body.
//!
//! Every client-side failure is reported as the generic bad request
//! response. What actually went wrong is kept as error context and logged.

pub mod enhanced_json;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::validated_json::ValidateJson;

//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], a JSON extractor that combines
//! deserialization with validation using the `validator` crate.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::Json;
use crate::TRACING_TARGET_HANDLER_ERROR;
use crate::handler::{Error, ErrorKind};

/// JSON extractor with automatic validation using the `validator` crate.
///
/// Also see [`Json`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats length validation errors.
fn format_length_error(field: &str, params: &HashMap<Cow<'static, str>, serde_json::Value>) -> String {
    let number = |key: &str| params.get(key).and_then(serde_json::Value::as_u64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => format!(
            "Field '{}' must be between {} and {} characters long",
            field, min, max
        ),
        (Some(min), None) => format!("Field '{}' must be at least {} characters long", field, min),
        (None, Some(max)) => format!("Field '{}' must be at most {} characters long", field, max),
        _ => format!("Field '{}' has invalid length", field),
    }
}

/// Formats a single validation error.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{}': {}", field, custom_message);
    }

    match error.code.as_ref() {
        "length" => format_length_error(field, &error.params),
        "required" => format!("Field '{}' is required and cannot be empty", field),
        code => format!("Field '{}' failed validation: {}", field, code),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let error_messages: Vec<String> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(field_errors) => field_errors
                    .iter()
                    .map(|error| format_validation_error(field, error))
                    .collect(),
                _ => vec![format!("Field '{}' is invalid", field)],
            })
            .collect();

        let context = match error_messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            target: TRACING_TARGET_HANDLER_ERROR,
            errors = %context,
            "Request validation failed"
        );

        ErrorKind::BadRequest.with_context(context)
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 4))]
        language: String,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let errors = Sample {
            language: String::new(),
        }
        .validate()
        .unwrap_err();

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), None);
        assert_eq!(
            error.context(),
            Some("Field 'language' must be between 1 and 4 characters long")
        );
    }

    #[test]
    fn custom_messages_take_precedence() {
        let mut error = ValidationError::new("image_missing");
        error.message = Some("An image is required".into());

        assert_eq!(
            format_validation_error("__all__", &error),
            "Field '__all__': An image is required"
        );
    }
}

//! Request payloads accepted by the JSON API and their conversion into domain
//! payloads.

use validator::{Validate, ValidationErrors};

use crate::domain::validation::ValidationError;

pub mod articles;
pub mod comments;
pub mod tags;

/// Result type returned by the form helpers.
pub type FormResult<T> = Result<T, ValidationError>;

/// Whether an update replaces the resource or patches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `PUT`: required fields must be present.
    Full,
    /// `PATCH`: omitted fields keep their stored value.
    Partial,
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut converted = ValidationError::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                converted.add(field.to_string(), message);
            }
        }
        converted
    }
}

/// Trim surrounding whitespace of an optional text input.
fn trim_input(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

/// Run the `validator` rules of a form and convert the failures.
fn input_errors<T: Validate>(form: &T) -> ValidationError {
    match form.validate() {
        Ok(()) => ValidationError::new(),
        Err(errors) => errors.into(),
    }
}

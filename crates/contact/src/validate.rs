use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use validator::{Validate, ValidationError};

use crate::{Field, FieldErrors, FormFields};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters long";

const MESSAGE_MIN_CHARS: usize = 10;

// Shape check only: one "@", a "." somewhere after it, no whitespace.
static RE_EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Trims the same characters a browser text input's `trim()` does,
/// including the byte order mark.
pub(crate) fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Length in UTF-16 code units, matching the counter shown in the browser.
pub(crate) fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub(crate) fn check_name(name: &str) -> Result<(), ValidationError> {
    if trim_input(name).is_empty() {
        return Err(error("required", NAME_REQUIRED));
    }

    Ok(())
}

pub(crate) fn check_email(email: &str) -> Result<(), ValidationError> {
    if trim_input(email).is_empty() {
        return Err(error("required", EMAIL_REQUIRED));
    }

    if !RE_EMAIL_SHAPE.is_match(email) {
        return Err(error("email", EMAIL_INVALID));
    }

    Ok(())
}

pub(crate) fn check_message(message: &str) -> Result<(), ValidationError> {
    let trimmed = trim_input(message);
    if trimmed.is_empty() {
        return Err(error("required", MESSAGE_REQUIRED));
    }

    if text_len(trimmed) < MESSAGE_MIN_CHARS {
        return Err(error("length", MESSAGE_TOO_SHORT));
    }

    Ok(())
}

impl FormFields {
    /// Runs every field check and returns a fresh error mapping.
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let Err(validation_errors) = self.validate() else {
            return errors;
        };

        for (field, field_errors) in validation_errors.field_errors() {
            let Ok(field) = Field::from_str(&field.to_string()) else {
                tracing::warn!(field = %field, "Validation error for unknown field");
                continue;
            };

            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());

            errors.insert(field, message);
        }

        errors
    }
}

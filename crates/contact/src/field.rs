use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::validate::{check_email, check_message, check_name, text_len};

/// Soft display guideline for the message box. Never enforced by validation.
pub const MESSAGE_SOFT_LIMIT: usize = 500;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Validate, Default, Clone, Debug, PartialEq, Eq)]
pub struct FormFields {
    #[validate(custom(function = "check_name"))]
    pub name: String,
    #[validate(custom(function = "check_email"))]
    pub email: String,
    #[validate(custom(function = "check_message"))]
    pub message: String,
}

impl FormFields {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    /// Character count shown next to the message box.
    pub fn message_len(&self) -> usize {
        text_len(&self.message)
    }

    pub fn exceeds_soft_limit(&self) -> bool {
        self.message_len() > MESSAGE_SOFT_LIMIT
    }
}

/// Per-field validation messages. A missing entry means the field is fine.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors(HashMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Errors in form order (name, email, message).
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::VARIANTS
            .iter()
            .filter_map(|field| self.get(*field).map(|msg| (*field, msg)))
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub(crate) fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }
}

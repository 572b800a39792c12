use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DELIMITER;

/// What to do with text input longer than its field allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlongPolicy {
    /// Keep the first `max` characters.
    #[default]
    Truncate,
    /// Refuse the value.
    Reject,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} must not contain '|' or line breaks")]
    Delimiter { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Label and maximum length (in characters) of a stored text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub max: usize,
}

impl FieldSpec {
    pub const HOSPITAL_NAME: Self = Self::new("Hospital name", 49);
    pub const CITY: Self = Self::new("City", 29);
    pub const PATIENT_NAME: Self = Self::new("Patient name", 49);
    pub const DISEASE: Self = Self::new("Disease", 49);
    pub const USERNAME: Self = Self::new("Username", 29);
    pub const PASSWORD: Self = Self::new("Password", 29);

    #[must_use]
    pub const fn new(label: &'static str, max: usize) -> Self {
        Self { label, max }
    }

    /// Check `value` against this field under `policy`, returning the value
    /// to store.
    pub fn apply(self, value: &str, policy: OverlongPolicy) -> Result<String, FieldError> {
        if value.contains([DELIMITER, '\n', '\r']) {
            return Err(FieldError::Delimiter { field: self.label });
        }

        match value.char_indices().nth(self.max) {
            None => Ok(value.to_string()),
            Some((cut, _)) => match policy {
                OverlongPolicy::Truncate => Ok(value[..cut].to_string()),
                OverlongPolicy::Reject => Err(FieldError::TooLong {
                    field: self.label,
                    max: self.max,
                }),
            },
        }
    }
}

//! Contact form field state

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire::RelayRequest;

/// One of the three contact form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    /// Submitter's name
    Name,
    /// Submitter's email address
    Email,
    /// Message body
    Message,
}

impl FormField {
    /// All fields in display order
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Wire and display name of the field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values of one open form session
///
/// Values are stored exactly as typed; trimming only happens when checking
/// completeness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    /// Submitter's name
    pub name: String,
    /// Submitter's email address
    pub email: String,
    /// Message body
    pub message: String,
}

impl SubmissionForm {
    /// Value of `field`
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    /// Replace the value of `field`
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Fields that are empty after trimming
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Whether every field has non-whitespace content
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Reset every field to the empty string
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot of the current values as a relay request
    #[must_use]
    pub fn to_request(&self) -> RelayRequest {
        RelayRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }
}

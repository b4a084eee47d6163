//! Inbound relay payload and its validation

use serde::Deserialize;
use validator::Validate;

use super::RelayRejection;

/// JSON body as received by the relay
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a client error by validation rather than as a deserialization
/// failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactPayload {
    /// Submitter's name
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,

    /// Submitter's email address
    #[validate(required(message = "email is required"))]
    pub email: Option<String>,

    /// Message body
    #[validate(required(message = "message is required"))]
    pub message: Option<String>,
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Submitter's name, trimmed
    pub name: String,
    /// Submitter's email address, trimmed
    pub email: String,
    /// Message body, as submitted
    pub message: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ContactPayload {
    /// Validate the payload and turn it into a [`ContactMessage`]
    ///
    /// Blank (whitespace-only) fields count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`RelayRejection::MissingFields`] naming every absent field
    pub fn into_message(self) -> Result<ContactMessage, RelayRejection> {
        let payload = Self {
            name: present(self.name),
            email: present(self.email),
            message: present(self.message),
        };

        payload.validate().map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(ToString::to_string)
                .collect();
            fields.sort();
            RelayRejection::MissingFields(fields)
        })?;

        match (payload.name, payload.email, payload.message) {
            (Some(name), Some(email), Some(message)) => Ok(ContactMessage {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                message,
            }),
            _ => Err(RelayRejection::MissingFields(Vec::new())),
        }
    }
}

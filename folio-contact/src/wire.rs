//! Wire contract between the submission controller and the mail relay
//!
//! `POST <relay_path>` with a JSON [`RelayRequest`] body. The relay answers
//! with a [`RelayResponse`]: `2xx {"success": true}` on delivery,
//! `4xx`/`5xx {"success": false, "error": "..."}` otherwise.

use serde::{Deserialize, Serialize};

/// Validated form contents serialized for transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Submitter's name
    pub name: String,
    /// Submitter's email address
    pub email: String,
    /// Message body
    pub message: String,
}

/// JSON body returned by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Whether the message was handed to the transport successfully
    pub success: bool,

    /// Caller-safe failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    /// Successful delivery
    #[must_use]
    pub const fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed delivery or rejected request
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Outcome of one relay call as seen by the submission controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum RelayResult {
    /// The relay handed the message to the transport
    Delivered,
    /// The relay, the network, or the deadline failed the request
    Failed(String),
}

impl RelayResult {
    /// Reason recorded when the relay does not answer before the deadline
    pub const TIMEOUT: &'static str = "timeout";

    /// Reason recorded when the send is abandoned before the relay answers
    pub const CANCELLED: &'static str = "cancelled";

    /// Whether this is [`RelayResult::Delivered`]
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delivered_response_omits_error() {
        let body = serde_json::to_value(RelayResponse::delivered()).unwrap();
        assert_eq!(body, json!({ "success": true }));
    }

    #[test]
    fn test_failed_response_carries_error() {
        let body = serde_json::to_value(RelayResponse::failed("Email failed to send.")).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Email failed to send." })
        );
    }

    #[test]
    fn test_response_without_error_field_parses() {
        let response: RelayResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!response.success);
        assert!(response.error.is_none());
    }
}

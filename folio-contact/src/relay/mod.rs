//! Mail relay: the stateless request to email-transport bridge
//!
//! One [`MailRelay`] is built at startup from the loaded configuration and
//! shared by every request. Each call to [`MailRelay::relay`] is independent:
//!
//! 1. anything but `POST` is rejected with `405`;
//! 2. a payload with a missing or blank field is rejected with `400`;
//! 3. otherwise the message is composed and handed to the transport exactly
//!    once; success is `200 {"success": true}`, any transport error is
//!    `500 {"success": false, "error": "Email failed to send."}`.
//!
//! Transport errors are logged here and never echoed to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio_contact::config::ContactConfig;
//! use folio_contact::email::ConsoleBackend;
//! use folio_contact::relay::{ContactPayload, MailRelay};
//! use http::Method;
//!
//! # async fn example() {
//! let config = ContactConfig::default();
//! let relay = MailRelay::new(Arc::new(ConsoleBackend::new()), &config);
//!
//! let payload = ContactPayload {
//!     name: Some("Ada".into()),
//!     email: Some("ada@example.com".into()),
//!     message: Some("Hello".into()),
//! };
//! let outcome = relay.relay(&Method::POST, payload).await;
//! assert!(outcome.is_delivered());
//! # }
//! ```

mod handler;
mod payload;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info, warn};
use validator::ValidateEmail;

use crate::config::{ContactConfig, MailBackend, RelaySettings};
use crate::email::{ConsoleBackend, ContactEmail, Email, EmailError, EmailSender, SmtpBackend};
use crate::wire::RelayResponse;

pub use handler::{contact, router};
pub use payload::{ContactMessage, ContactPayload};

/// Generic failure text returned for every transport error
pub const DELIVERY_FAILED: &str = "Email failed to send.";

/// Client errors detected before any transport attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayRejection {
    /// The request did not use `POST`
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// One or more required fields were missing or blank
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The body was not a JSON object of the expected shape
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The body exceeded `server.body_limit_bytes`
    #[error("request body too large")]
    BodyTooLarge,
}

/// Result of one relay call
#[derive(Debug)]
pub enum RelayOutcome {
    /// The transport accepted the message
    Delivered,
    /// The request was rejected before delivery was attempted
    Rejected(RelayRejection),
    /// The single delivery attempt failed
    Failed,
}

impl RelayOutcome {
    /// Whether the transport accepted the message
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// HTTP status this outcome maps to
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Delivered => StatusCode::OK,
            Self::Rejected(RelayRejection::MethodNotAllowed) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Rejected(RelayRejection::BodyTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Delivered => (status, Json(RelayResponse::delivered())).into_response(),
            Self::Rejected(RelayRejection::MethodNotAllowed) => (
                status,
                [(header::ALLOW, "POST")],
                RelayRejection::MethodNotAllowed.to_string(),
            )
                .into_response(),
            Self::Rejected(rejection) => {
                (status, Json(RelayResponse::failed(rejection.to_string()))).into_response()
            }
            Self::Failed => (status, Json(RelayResponse::failed(DELIVERY_FAILED))).into_response(),
        }
    }
}

/// Stateless bridge from contact payloads to the mail transport
pub struct MailRelay {
    sender: Arc<dyn EmailSender>,
    settings: RelaySettings,
    from: String,
}

impl MailRelay {
    /// Create a relay that delivers through `sender`
    ///
    /// The envelope sender is the configured SMTP account, shown under the
    /// configured display name.
    #[must_use]
    pub fn new(sender: Arc<dyn EmailSender>, config: &ContactConfig) -> Self {
        let account = config
            .smtp
            .username
            .clone()
            .unwrap_or_else(|| config.relay.recipient.clone());
        Self {
            sender,
            settings: config.relay.clone(),
            from: format!("\"{}\" <{account}>", config.relay.sender_name),
        }
    }

    /// Create a relay with the transport selected by `relay.backend`
    #[must_use]
    pub fn from_config(config: &ContactConfig) -> Self {
        let sender: Arc<dyn EmailSender> = match config.relay.backend {
            MailBackend::Smtp => Arc::new(SmtpBackend::new(config.smtp.clone())),
            MailBackend::Console => Arc::new(ConsoleBackend::verbose()),
        };
        Self::new(sender, config)
    }

    /// Relay one request
    ///
    /// Never returns an error: every failure is folded into the outcome.
    pub async fn relay(&self, method: &Method, payload: ContactPayload) -> RelayOutcome {
        if *method != Method::POST {
            warn!(%method, "Relay rejected non-POST request");
            return RelayOutcome::Rejected(RelayRejection::MethodNotAllowed);
        }

        let message = match payload.into_message() {
            Ok(message) => message,
            Err(rejection) => {
                warn!(%rejection, "Relay rejected incomplete payload");
                return RelayOutcome::Rejected(rejection);
            }
        };

        let email = match self.compose(&message) {
            Ok(email) => email,
            Err(e) => {
                error!(error = %e, "Failed to compose contact email");
                return RelayOutcome::Failed;
            }
        };

        match self.sender.send(email).await {
            Ok(()) => {
                info!(name = %message.name, "Contact message delivered");
                RelayOutcome::Delivered
            }
            Err(e) => {
                error!(error = %e, "Mailer error");
                RelayOutcome::Failed
            }
        }
    }

    /// Compose the owner notification for a validated message
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if a body template fails to render
    pub fn compose(&self, message: &ContactMessage) -> Result<Email, EmailError> {
        let template = ContactEmail {
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            site_name: self.settings.sender_name.clone(),
        };

        let subject = format!("{} {}", self.settings.subject_prefix, message.name);
        let mut email = Email::from_template(&template)?
            .to(&self.settings.recipient)
            .from(&self.from)
            .subject(subject.trim());

        if message.email.validate_email() {
            email = email.reply_to(&message.email);
        }

        Ok(email)
    }
}

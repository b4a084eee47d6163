//! Mail composition and delivery errors

use thiserror::Error;

/// Why a message could not be composed or delivered
///
/// None of these reach a relay caller verbatim; the relay logs them and
/// answers with a generic failure.
#[derive(Debug, Error)]
pub enum EmailError {
    /// No `To` address
    #[error("message has no recipient")]
    NoRecipients,

    /// No `From` address
    #[error("message has no sender")]
    NoSender,

    /// No subject line
    #[error("message has no subject")]
    NoSubject,

    /// Neither a text nor an HTML body
    #[error("message has no body")]
    NoContent,

    /// An address that does not parse as a mailbox
    #[error("not a mailbox: {0}")]
    InvalidAddress(String),

    /// A body template failed to render
    #[error("body template failed: {0}")]
    TemplateError(#[from] askama::Error),

    /// The SMTP server refused the message or the connection failed
    #[error("SMTP delivery failed: {0}")]
    SmtpError(String),

    /// The transport is not usable as configured (for example, no credentials)
    #[error("mail transport misconfigured: {0}")]
    ConfigError(String),
}

impl EmailError {
    /// [`EmailError::SmtpError`] from any message
    #[must_use]
    pub fn smtp(msg: impl Into<String>) -> Self {
        Self::SmtpError(msg.into())
    }

    /// [`EmailError::ConfigError`] from any message
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

//! Transport-independent outbound message

use serde::{Deserialize, Serialize};

use super::{EmailError, EmailTemplate};

/// One outbound message, assembled before a backend sees it
///
/// Addresses are kept as strings (`addr` or `Name <addr>`); backends parse
/// them when delivering.
///
/// ```rust
/// use folio_contact::email::Email;
///
/// let email = Email::new()
///     .to("owner@example.com")
///     .from("\"Portfolio\" <mailer@example.com>")
///     .reply_to("ada@example.com")
///     .subject("Message from Ada")
///     .text("Hello!")
///     .html("<p>Hello!</p>");
///
/// assert!(email.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Recipients
    pub to: Vec<String>,
    /// Envelope sender
    pub from: Option<String>,
    /// Where replies go; the submitter for contact messages
    pub reply_to: Option<String>,
    /// Subject line
    pub subject: Option<String>,
    /// Plain text body
    pub text: Option<String>,
    /// HTML body
    pub html: Option<String>,
}

impl Email {
    /// Empty message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message whose bodies are rendered from `template`
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if rendering fails
    pub fn from_template<T: EmailTemplate>(template: &T) -> Result<Self, EmailError> {
        let (html, text) = template.render_email()?;
        Ok(Self {
            html,
            text,
            ..Self::default()
        })
    }

    /// Append a recipient
    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Envelope sender
    #[must_use]
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Reply-To address
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Subject line
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Plain text body
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// HTML body
    #[must_use]
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Check that the message can be handed to a transport
    ///
    /// Needs at least one recipient, a sender, a subject and one body.
    ///
    /// # Errors
    ///
    /// Returns the first missing part as an [`EmailError`]
    pub fn validate(&self) -> Result<(), EmailError> {
        match self {
            Self { to, .. } if to.is_empty() => Err(EmailError::NoRecipients),
            Self { from: None, .. } => Err(EmailError::NoSender),
            Self { subject: None, .. } => Err(EmailError::NoSubject),
            Self {
                text: None,
                html: None,
                ..
            } => Err(EmailError::NoContent),
            _ => Ok(()),
        }
    }
}

//! Console backend for development
//!
//! Logs emails instead of sending them, so the relay can run locally without
//! SMTP credentials.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::email::{Email, EmailError, EmailSender};

/// Writes messages to the log instead of delivering them
///
/// Selected with `relay.backend = "console"`.
#[derive(Debug, Clone, Default)]
pub struct ConsoleBackend {
    verbose: bool,
}

impl ConsoleBackend {
    /// Log headers only
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log headers and both bodies
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

#[async_trait]
impl EmailSender for ConsoleBackend {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        email.validate()?;

        let from = email.from.as_ref().ok_or(EmailError::NoSender)?;
        let subject = email.subject.as_ref().ok_or(EmailError::NoSubject)?;

        info!(
            from = %from,
            to = ?email.to,
            reply_to = ?email.reply_to,
            subject = %subject,
            "Contact email captured by console backend"
        );

        if self.verbose {
            debug!(text = ?email.text, html = ?email.html, "Captured email bodies");
        }

        Ok(())
    }
}

//! Recording email sender

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::email::{Email, EmailError, EmailSender};

/// Email sender that records instead of delivering
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the relay.
///
/// ```rust
/// use folio_contact::email::{Email, EmailSender};
/// use folio_contact::testing::RecordingEmailSender;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = RecordingEmailSender::new();
///
/// sender
///     .send(Email::new().to("owner@example.com").from("m@example.com").subject("Hi").text("Hello"))
///     .await?;
///
/// assert_eq!(sender.sent_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<Email>>>,
    attempts: Arc<Mutex<usize>>,
    failure: Option<String>,
}

impl RecordingEmailSender {
    /// Create a sender that accepts every valid email
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sender whose every attempt fails with an SMTP error
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Number of delivery attempts, successful or not
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }

    /// Number of emails accepted
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// All accepted emails
    #[must_use]
    pub fn sent_emails(&self) -> Vec<Email> {
        self.sent.lock().clone()
    }

    /// The last accepted email
    #[must_use]
    pub fn last_sent(&self) -> Option<Email> {
        self.sent.lock().last().cloned()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        *self.attempts.lock() += 1;

        if let Some(reason) = &self.failure {
            return Err(EmailError::smtp(reason.clone()));
        }

        email.validate()?;
        self.sent.lock().push(email);
        Ok(())
    }
}

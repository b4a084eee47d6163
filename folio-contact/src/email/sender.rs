//! Delivery seam between the relay and a mail transport

use async_trait::async_trait;

use super::{Email, EmailError};

/// A mail transport
///
/// Implemented by every backend. The relay holds one as
/// `Arc<dyn EmailSender>` and makes exactly one `send` call per accepted
/// request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver `email`; one call is one delivery attempt
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the message is incomplete or the transport refuses it
    async fn send(&self, email: Email) -> Result<(), EmailError>;
}

//! Application state management
//!
//! Holds the configuration loaded at startup and the single [`MailRelay`]
//! shared by every request handler.

use std::sync::Arc;

use crate::config::ContactConfig;
use crate::email::EmailSender;
use crate::relay::MailRelay;

/// Application state for the relay server
///
/// # Example
///
/// ```rust
/// use folio_contact::{config::ContactConfig, state::AppState};
///
/// let state = AppState::new(ContactConfig::default());
///
/// let app = folio_contact::relay::router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<ContactConfig>,

    /// Relay shared by all requests
    relay: Arc<MailRelay>,
}

impl AppState {
    /// Create state with the transport selected by the configuration
    #[must_use]
    pub fn new(config: ContactConfig) -> Self {
        let relay = MailRelay::from_config(&config);
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
        }
    }

    /// Create state with an explicit transport
    #[must_use]
    pub fn with_sender(config: ContactConfig, sender: Arc<dyn EmailSender>) -> Self {
        let relay = MailRelay::new(sender, &config);
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
        }
    }

    /// Get configuration reference
    #[must_use]
    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Get the mail relay
    #[must_use]
    pub fn relay(&self) -> &MailRelay {
        &self.relay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEmailSender;

    #[test]
    fn test_new_state() {
        let state = AppState::new(ContactConfig::default());
        assert_eq!(state.config().server.relay_path, "/api/contact");
    }

    #[test]
    fn test_clone_state() {
        let state = AppState::with_sender(
            ContactConfig::default(),
            Arc::new(RecordingEmailSender::new()),
        );
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.relay, &cloned.relay));
    }
}

//! Lifecycle states of the contact form

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete stage of the contact-form interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// No form surface visible
    #[default]
    Closed,
    /// Form visible and editable
    Open,
    /// Confirmation dialog visible over the form
    AwaitingConfirmation,
    /// Relay request in flight; controls disabled
    Sending,
    /// Relay answered; resolving to `Closed` or `Open`
    Settled,
}

impl LifecycleState {
    /// Whether page scrolling is locked in this state
    ///
    /// True exactly while the form surface is visible.
    #[must_use]
    pub const fn locks_scroll(self) -> bool {
        matches!(self, Self::Open | Self::AwaitingConfirmation | Self::Sending)
    }

    /// Whether the confirmation dialog is visible
    #[must_use]
    pub const fn shows_confirmation(self) -> bool {
        matches!(self, Self::AwaitingConfirmation)
    }

    /// Whether user controls are enabled (everything is disabled while sending)
    #[must_use]
    pub const fn controls_enabled(self) -> bool {
        !matches!(self, Self::Sending)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::Sending => "sending",
            Self::Settled => "settled",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lock_table() {
        assert!(!LifecycleState::Closed.locks_scroll());
        assert!(LifecycleState::Open.locks_scroll());
        assert!(LifecycleState::AwaitingConfirmation.locks_scroll());
        assert!(LifecycleState::Sending.locks_scroll());
        assert!(!LifecycleState::Settled.locks_scroll());
    }

    #[test]
    fn test_confirmation_only_when_awaiting() {
        assert!(LifecycleState::AwaitingConfirmation.shows_confirmation());
        assert!(!LifecycleState::Open.shows_confirmation());
        assert!(!LifecycleState::Sending.shows_confirmation());
    }
}

//! Submission controller: drives one contact form session
//!
//! ```text
//!            open_form            request_confirmation (valid)
//!  Closed ─────────────▶ Open ─────────────────────────────▶ AwaitingConfirmation
//!    ▲  ◀─────────────── │  ◀─────────────────────────────── │   │
//!    │     close_form    │        cancel_confirmation        │   │ confirm_send
//!    │                   │  ◀──────────── close_form ────────┘   ▼
//!    │                   ▲                                     Sending
//!    │                   │ Failed / error / timeout               │
//!    │                   └──────────────────────────── Settled ◀──┘
//!    └────────────────────────── Delivered ───────────────┘
//! ```
//!
//! Operations take `&self`; the session lives behind a mutex that is never
//! held across the relay call, so the presentation layer can keep observing
//! while a request is in flight. Anything other than observation is rejected
//! while `Sending`.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::form::{FormField, SubmissionForm};
use super::lifecycle::LifecycleState;
use super::notification::{Notification, NotificationKind, NotificationScheduler};
use crate::client::RelayClient;
use crate::config::ClientSettings;
use crate::wire::RelayResult;

/// Shown when `request_confirmation` finds an empty field
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields before sending.";
/// Shown while the relay request is in flight
pub const SENDING_MESSAGE: &str = "Sending your message...";
/// Shown after the relay delivered the message
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! Thanks for reaching out.";
/// Shown after any relay, network or deadline failure
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

/// An operation was invoked in a state that does not allow it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The current lifecycle state does not accept the operation
    #[error("`{operation}` is not allowed while the form is {state}")]
    IllegalState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the controller was in
        state: LifecycleState,
    },
}

/// Result of [`SubmissionController::request_confirmation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// All fields are present; the confirmation dialog is shown
    Ready,
    /// Some fields are empty; the form stays open
    Incomplete(Vec<FormField>),
}

/// Read-only view of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSnapshot {
    /// Current lifecycle state
    pub state: LifecycleState,
    /// Current field values
    pub form: SubmissionForm,
    /// Whether page scrolling is locked
    pub scroll_locked: bool,
    /// Whether the confirmation dialog is visible
    pub confirmation_visible: bool,
    /// Whether user controls are enabled
    pub controls_enabled: bool,
}

#[derive(Debug, Default)]
struct Session {
    state: LifecycleState,
    form: SubmissionForm,
}

impl Session {
    fn require(
        &self,
        operation: &'static str,
        allowed: &[LifecycleState],
    ) -> Result<(), ControllerError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            warn!(operation, state = %self.state, "Rejected controller operation");
            Err(ControllerError::IllegalState {
                operation,
                state: self.state,
            })
        }
    }

    fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state,
            form: self.form.clone(),
            scroll_locked: self.state.locks_scroll(),
            confirmation_visible: self.state.shows_confirmation(),
            controls_enabled: self.state.controls_enabled(),
        }
    }
}

/// Orchestrates open / validate / confirm / send / report for one session
///
/// # Example
///
/// ```rust,no_run
/// use folio_contact::client::HttpRelayClient;
/// use folio_contact::config::ClientSettings;
/// use folio_contact::submission::{FormField, SubmissionController};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ClientSettings::default();
/// let client = HttpRelayClient::new(&settings.relay_url)?;
/// let controller = SubmissionController::new(client, settings);
///
/// controller.open_form()?;
/// controller.update_field(FormField::Name, "Ada")?;
/// controller.update_field(FormField::Email, "ada@example.com")?;
/// controller.update_field(FormField::Message, "Hello")?;
/// controller.request_confirmation()?;
/// let result = controller.confirm_send().await?;
/// # Ok(())
/// # }
/// ```
pub struct SubmissionController<C> {
    client: Arc<C>,
    settings: ClientSettings,
    session: Mutex<Session>,
    snapshots: watch::Sender<ControllerSnapshot>,
    notifications: NotificationScheduler,
}

impl<C: RelayClient> SubmissionController<C> {
    /// Create a controller in the `Closed` state
    ///
    /// Notification timers run on the runtime current at this call, if any.
    #[must_use]
    pub fn new(client: C, settings: ClientSettings) -> Self {
        let session = Session::default();
        let (snapshots, _) = watch::channel(session.snapshot());
        Self {
            client: Arc::new(client),
            settings,
            session: Mutex::new(session),
            snapshots,
            notifications: NotificationScheduler::new(),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.session.lock().state
    }

    /// Current field values
    #[must_use]
    pub fn form(&self) -> SubmissionForm {
        self.session.lock().form.clone()
    }

    /// Whether page scrolling is locked
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.state().locks_scroll()
    }

    /// The visible notification, if any
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    /// Full read-only view of the session
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.session.lock().snapshot()
    }

    /// Observe every lifecycle transition and field change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.snapshots.subscribe()
    }

    /// Observe the visible notification
    #[must_use]
    pub fn notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notifications.subscribe()
    }

    /// `Closed -> Open`; no-op if the form is already open
    ///
    /// # Errors
    ///
    /// Rejected while `Sending` or `Settled`
    pub fn open_form(&self) -> Result<(), ControllerError> {
        let mut session = self.session.lock();
        match session.state {
            LifecycleState::Open | LifecycleState::AwaitingConfirmation => Ok(()),
            LifecycleState::Closed => {
                self.transition(&mut session, LifecycleState::Open);
                Ok(())
            }
            _ => session.require("open_form", &[LifecycleState::Closed]),
        }
    }

    /// Replace one field value; no validation happens here
    ///
    /// # Errors
    ///
    /// Rejected unless the form is `Open`
    pub fn update_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let mut session = self.session.lock();
        session.require("update_field", &[LifecycleState::Open])?;
        session.form.set(field, value);
        self.publish(&session);
        Ok(())
    }

    /// Validate the form and show the confirmation dialog
    ///
    /// On an incomplete form a validation notification is shown and the
    /// state stays `Open`.
    ///
    /// # Errors
    ///
    /// Rejected unless the form is `Open`
    pub fn request_confirmation(&self) -> Result<Confirmation, ControllerError> {
        let mut session = self.session.lock();
        session.require("request_confirmation", &[LifecycleState::Open])?;

        let missing = session.form.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Form incomplete");
            self.notifications.show(
                VALIDATION_MESSAGE,
                NotificationKind::Error,
                self.settings.notification_ttl(),
            );
            return Ok(Confirmation::Incomplete(missing));
        }

        self.transition(&mut session, LifecycleState::AwaitingConfirmation);
        Ok(Confirmation::Ready)
    }

    /// `AwaitingConfirmation -> Open`
    ///
    /// # Errors
    ///
    /// Rejected unless the confirmation dialog is visible
    pub fn cancel_confirmation(&self) -> Result<(), ControllerError> {
        let mut session = self.session.lock();
        session.require("cancel_confirmation", &[LifecycleState::AwaitingConfirmation])?;
        self.transition(&mut session, LifecycleState::Open);
        Ok(())
    }

    /// Discard the form and return to `Closed`
    ///
    /// # Errors
    ///
    /// Rejected unless the form is `Open` or `AwaitingConfirmation`
    pub fn close_form(&self) -> Result<(), ControllerError> {
        let mut session = self.session.lock();
        session.require(
            "close_form",
            &[LifecycleState::Open, LifecycleState::AwaitingConfirmation],
        )?;
        session.form.clear();
        self.transition(&mut session, LifecycleState::Closed);
        Ok(())
    }

    /// Send the confirmed form to the relay, exactly once
    ///
    /// The request is built from the form as it is at confirmation time.
    /// The relay call is bounded by `request_timeout_ms`; a missed deadline
    /// becomes `Failed("timeout")`. The outcome is published as `Settled`
    /// for `settle_ms`, then on `Delivered` the form is cleared and the
    /// state returns to `Closed`; on any failure the form is kept and the
    /// state returns to `Open`.
    ///
    /// Dropping the future never strands the session: before the relay
    /// answers it resolves as `Failed("cancelled")`, and during the settle
    /// pause it resolves with the outcome already received.
    ///
    /// # Errors
    ///
    /// Rejected unless the confirmation dialog is visible
    pub async fn confirm_send(&self) -> Result<RelayResult, ControllerError> {
        let request = {
            let mut session = self.session.lock();
            session.require("confirm_send", &[LifecycleState::AwaitingConfirmation])?;
            let request = session.form.to_request();
            self.transition(&mut session, LifecycleState::Sending);
            request
        };
        let mut in_flight = InFlight::new(self);

        self.notifications.show(
            SENDING_MESSAGE,
            NotificationKind::Info,
            self.settings.in_flight_ttl(),
        );

        let deadline = self.settings.request_timeout();
        let result = match tokio::time::timeout(deadline, self.client.submit(request)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "Relay unreachable");
                RelayResult::Failed(e.to_string())
            }
            Err(_) => {
                warn!(?deadline, "Relay did not answer before the deadline");
                RelayResult::Failed(RelayResult::TIMEOUT.to_string())
            }
        };

        in_flight.settle(result);
        let pause = self.settings.settle_delay();
        if pause.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(pause).await;
        }

        Ok(in_flight.finish())
    }

    /// Leave `Sending`/`Settled` for the state `result` calls for
    fn resolve(&self, result: &RelayResult) {
        let mut session = self.session.lock();
        match result {
            RelayResult::Delivered => {
                info!("Contact message delivered");
                session.form.clear();
                self.transition(&mut session, LifecycleState::Closed);
                self.notifications.show(
                    SUCCESS_MESSAGE,
                    NotificationKind::Success,
                    self.settings.notification_ttl(),
                );
            }
            RelayResult::Failed(reason) => {
                warn!(%reason, "Contact message not delivered");
                self.transition(&mut session, LifecycleState::Open);
                self.notifications.show(
                    FAILURE_MESSAGE,
                    NotificationKind::Error,
                    self.settings.notification_ttl(),
                );
            }
        }
    }

    fn transition(&self, session: &mut Session, to: LifecycleState) {
        debug!(from = %session.state, %to, "Lifecycle transition");
        session.state = to;
        self.publish(session);
    }

    fn publish(&self, session: &Session) {
        self.snapshots.send_replace(session.snapshot());
    }
}

/// Owns the `Sending`/`Settled` phase of one `confirm_send` call
///
/// Resolves the session exactly once, either through [`InFlight::finish`]
/// or on drop.
struct InFlight<'a, C: RelayClient> {
    controller: &'a SubmissionController<C>,
    outcome: Option<RelayResult>,
    resolved: bool,
}

impl<'a, C: RelayClient> InFlight<'a, C> {
    const fn new(controller: &'a SubmissionController<C>) -> Self {
        Self {
            controller,
            outcome: None,
            resolved: false,
        }
    }

    fn settle(&mut self, result: RelayResult) {
        self.outcome = Some(result);
        let mut session = self.controller.session.lock();
        self.controller.transition(&mut session, LifecycleState::Settled);
    }

    fn finish(mut self) -> RelayResult {
        self.resolved = true;
        let result = self
            .outcome
            .take()
            .unwrap_or_else(|| RelayResult::Failed(RelayResult::CANCELLED.to_string()));
        self.controller.resolve(&result);
        result
    }
}

impl<C: RelayClient> Drop for InFlight<'_, C> {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        let result = self.outcome.take().unwrap_or_else(|| {
            warn!("Send abandoned before the relay answered");
            RelayResult::Failed(RelayResult::CANCELLED.to_string())
        });
        self.controller.resolve(&result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockRelayClient, RelayClientError};
    use crate::wire::RelayRequest;
    use std::time::Duration;

    fn settings() -> ClientSettings {
        ClientSettings {
            request_timeout_ms: 1_000,
            settle_ms: 0,
            ..ClientSettings::default()
        }
    }

    fn fill(controller: &SubmissionController<MockRelayClient>) {
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();
        controller
            .update_field(FormField::Email, "ada@example.com")
            .unwrap();
        controller.update_field(FormField::Message, "Hello").unwrap();
    }

    fn notification_text(controller: &SubmissionController<MockRelayClient>) -> Option<String> {
        controller.notification().map(|n| n.text)
    }

    #[tokio::test]
    async fn test_open_is_idempotent_and_locks_scroll() {
        let controller = SubmissionController::new(MockRelayClient::new(), settings());
        assert!(!controller.scroll_locked());

        controller.open_form().unwrap();
        controller.open_form().unwrap();

        assert_eq!(controller.state(), LifecycleState::Open);
        assert!(controller.scroll_locked());
    }

    #[tokio::test]
    async fn test_operations_rejected_while_closed() {
        let controller = SubmissionController::new(MockRelayClient::new(), settings());

        assert_eq!(
            controller.update_field(FormField::Name, "Ada"),
            Err(ControllerError::IllegalState {
                operation: "update_field",
                state: LifecycleState::Closed,
            })
        );
        assert!(controller.request_confirmation().is_err());
        assert!(controller.cancel_confirmation().is_err());
        assert!(controller.close_form().is_err());
        assert!(controller.confirm_send().await.is_err());
        assert_eq!(controller.form(), SubmissionForm::default());
    }

    #[tokio::test]
    async fn test_incomplete_form_stays_open_with_notification() {
        let controller = SubmissionController::new(MockRelayClient::new(), settings());
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();
        controller.update_field(FormField::Message, "   ").unwrap();

        let confirmation = controller.request_confirmation().unwrap();

        assert_eq!(
            confirmation,
            Confirmation::Incomplete(vec![FormField::Email, FormField::Message])
        );
        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(notification_text(&controller).as_deref(), Some(VALIDATION_MESSAGE));
    }

    #[tokio::test]
    async fn test_cancel_confirmation_returns_to_open_without_network() {
        let mut client = MockRelayClient::new();
        client.expect_submit().times(0);
        let controller = SubmissionController::new(client, settings());
        fill(&controller);

        assert_eq!(controller.request_confirmation().unwrap(), Confirmation::Ready);
        assert!(controller.snapshot().confirmation_visible);

        controller.cancel_confirmation().unwrap();
        assert_eq!(controller.state(), LifecycleState::Open);
        assert!(!controller.snapshot().confirmation_visible);
        assert_eq!(controller.form().name, "Ada");
    }

    #[tokio::test]
    async fn test_close_form_discards_input() {
        let controller = SubmissionController::new(MockRelayClient::new(), settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        controller.close_form().unwrap();

        assert_eq!(controller.state(), LifecycleState::Closed);
        assert_eq!(controller.form(), SubmissionForm::default());
        assert!(!controller.scroll_locked());
    }

    #[tokio::test]
    async fn test_delivered_clears_and_closes() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .withf(|request: &RelayRequest| {
                request.name == "Ada"
                    && request.email == "ada@example.com"
                    && request.message == "Hello"
            })
            .times(1)
            .returning(|_| Ok(RelayResult::Delivered));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        let result = controller.confirm_send().await.unwrap();

        assert_eq!(result, RelayResult::Delivered);
        assert_eq!(controller.state(), LifecycleState::Closed);
        assert_eq!(controller.form(), SubmissionForm::default());
        assert!(!controller.scroll_locked());
        assert_eq!(notification_text(&controller).as_deref(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_preserves_and_reopens() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Failed("smtp_error".to_string())));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        let result = controller.confirm_send().await.unwrap();

        assert_eq!(result, RelayResult::Failed("smtp_error".to_string()));
        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(controller.form().name, "Ada");
        assert_eq!(controller.form().email, "ada@example.com");
        assert_eq!(controller.form().message, "Hello");
        assert_eq!(notification_text(&controller).as_deref(), Some(FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_network_error_maps_to_failure() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Err(RelayClientError::Network("connection refused".to_string())));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        let result = controller.confirm_send().await.unwrap();

        assert!(matches!(result, RelayResult::Failed(reason) if reason.contains("connection refused")));
        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(notification_text(&controller).as_deref(), Some(FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_second_confirm_without_reconfirmation_is_rejected() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Failed("smtp_error".to_string())));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();
        controller.confirm_send().await.unwrap();

        // Back in Open: a retry needs a fresh confirmation
        assert_eq!(
            controller.confirm_send().await,
            Err(ControllerError::IllegalState {
                operation: "confirm_send",
                state: LifecycleState::Open,
            })
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_final_snapshot() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Delivered));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        let mut rx = controller.subscribe();
        assert!(rx.borrow_and_update().confirmation_visible);
        controller.confirm_send().await.unwrap();

        assert!(rx.has_changed().unwrap());
        let last = rx.borrow_and_update().clone();
        assert_eq!(last.state, LifecycleState::Closed);
        assert!(!last.scroll_locked);
        assert!(last.controls_enabled);
    }

    #[tokio::test]
    async fn test_controls_disabled_while_sending() {
        struct GatedRelay {
            gate: tokio::sync::Notify,
        }

        #[async_trait::async_trait]
        impl RelayClient for GatedRelay {
            async fn submit(&self, _: RelayRequest) -> Result<RelayResult, RelayClientError> {
                self.gate.notified().await;
                Ok(RelayResult::Delivered)
            }
        }

        let controller = SubmissionController::new(
            GatedRelay {
                gate: tokio::sync::Notify::new(),
            },
            settings(),
        );
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();
        controller.update_field(FormField::Email, "ada@example.com").unwrap();
        controller.update_field(FormField::Message, "Hello").unwrap();
        controller.request_confirmation().unwrap();

        let mut rx = controller.subscribe();
        let observer = async {
            rx.wait_for(|s| s.state == LifecycleState::Sending).await.unwrap();

            let snapshot = controller.snapshot();
            assert!(snapshot.scroll_locked);
            assert!(!snapshot.controls_enabled);
            assert!(!snapshot.confirmation_visible);
            assert_eq!(
                controller.notification().map(|n| n.text).as_deref(),
                Some(SENDING_MESSAGE)
            );
            assert!(controller.update_field(FormField::Name, "Eve").is_err());
            assert!(controller.close_form().is_err());
            assert!(controller.open_form().is_err());
            assert!(controller.confirm_send().await.is_err());

            controller.client.gate.notify_one();
        };

        let (result, ()) = tokio::join!(controller.confirm_send(), observer);

        assert_eq!(result.unwrap(), RelayResult::Delivered);
        assert_eq!(controller.state(), LifecycleState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_synthesizes_failure() {
        struct SlowRelay;

        #[async_trait::async_trait]
        impl RelayClient for SlowRelay {
            async fn submit(&self, _: RelayRequest) -> Result<RelayResult, RelayClientError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(RelayResult::Delivered)
            }
        }

        let controller = SubmissionController::new(SlowRelay, settings());
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();
        controller.update_field(FormField::Email, "ada@example.com").unwrap();
        controller.update_field(FormField::Message, "Hello").unwrap();
        controller.request_confirmation().unwrap();

        let result = controller.confirm_send().await.unwrap();

        assert_eq!(result, RelayResult::Failed(RelayResult::TIMEOUT.to_string()));
        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(controller.form().message, "Hello");
        assert_eq!(
            controller.notification().map(|n| n.text).as_deref(),
            Some(FAILURE_MESSAGE)
        );
    }

    struct StalledRelay;

    #[async_trait::async_trait]
    impl RelayClient for StalledRelay {
        async fn submit(&self, _: RelayRequest) -> Result<RelayResult, RelayClientError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(RelayResult::Delivered)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_send_reopens_form() {
        let controller = SubmissionController::new(StalledRelay, settings());
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();
        controller.update_field(FormField::Email, "ada@example.com").unwrap();
        controller.update_field(FormField::Message, "Hello").unwrap();
        controller.request_confirmation().unwrap();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), controller.confirm_send()).await;
        assert!(abandoned.is_err());

        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(controller.form().message, "Hello");
        assert_eq!(
            controller.notification().map(|n| n.text).as_deref(),
            Some(FAILURE_MESSAGE)
        );

        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(controller.state(), LifecycleState::Open);
        controller.open_form().unwrap();
        controller.close_form().unwrap();
        assert_eq!(controller.state(), LifecycleState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_settle_keeps_received_outcome() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Delivered));
        let controller = SubmissionController::new(
            client,
            ClientSettings {
                settle_ms: 500,
                ..settings()
            },
        );
        fill(&controller);
        controller.request_confirmation().unwrap();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(100), controller.confirm_send()).await;
        assert!(abandoned.is_err());

        assert_eq!(controller.state(), LifecycleState::Closed);
        assert_eq!(controller.form(), SubmissionForm::default());
        assert_eq!(notification_text(&controller).as_deref(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_settled_is_published_before_final_state() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Delivered));
        let controller = SubmissionController::new(client, settings());
        fill(&controller);
        controller.request_confirmation().unwrap();

        let mut rx = controller.subscribe();
        let recorder = async {
            let mut seen = Vec::new();
            loop {
                rx.changed().await.unwrap();
                let state = rx.borrow_and_update().state;
                seen.push(state);
                if state == LifecycleState::Closed {
                    break seen;
                }
            }
        };

        let (result, seen) = tokio::join!(controller.confirm_send(), recorder);

        assert_eq!(result.unwrap(), RelayResult::Delivered);
        assert!(seen.contains(&LifecycleState::Settled));
        assert_eq!(seen.last(), Some(&LifecycleState::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_held_for_settle_delay() {
        let mut client = MockRelayClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Ok(RelayResult::Failed("smtp_error".to_string())));
        let controller = SubmissionController::new(
            client,
            ClientSettings {
                settle_ms: 300,
                ..settings()
            },
        );
        fill(&controller);
        controller.request_confirmation().unwrap();

        let mut rx = controller.subscribe();
        let observer = async {
            rx.wait_for(|s| s.state == LifecycleState::Settled)
                .await
                .unwrap();
            let snapshot = controller.snapshot();
            assert!(!snapshot.scroll_locked);
            assert!(snapshot.controls_enabled);
            assert!(controller.open_form().is_err());

            tokio::time::sleep(Duration::from_millis(200)).await;
            assert_eq!(controller.state(), LifecycleState::Settled);
        };

        let (result, ()) = tokio::join!(controller.confirm_send(), observer);

        assert_eq!(result.unwrap(), RelayResult::Failed("smtp_error".to_string()));
        assert_eq!(controller.state(), LifecycleState::Open);
    }

    #[test]
    fn test_incomplete_form_outside_runtime() {
        let controller = SubmissionController::new(MockRelayClient::new(), settings());
        controller.open_form().unwrap();
        controller.update_field(FormField::Name, "Ada").unwrap();

        let confirmation = controller.request_confirmation().unwrap();

        assert_eq!(
            confirmation,
            Confirmation::Incomplete(vec![FormField::Email, FormField::Message])
        );
        assert_eq!(controller.state(), LifecycleState::Open);
        assert_eq!(notification_text(&controller).as_deref(), Some(VALIDATION_MESSAGE));
    }
}

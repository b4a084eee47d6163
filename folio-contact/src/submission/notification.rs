//! Transient status notifications with owned dismissal timers
//!
//! At most one notification is visible. [`NotificationScheduler::show`]
//! supersedes the visible one immediately and arms a single dismissal timer.
//! Timers are tagged with the id of the notification they were armed for:
//! arming a new timer aborts the previous one, and a timer that still fires
//! only clears the slot if it holds *its* notification.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{trace, warn};
use uuid::Uuid;

/// Visual category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Progress information
    Info,
    /// The message was delivered
    Success,
    /// Validation or delivery failure
    Error,
}

/// A short-lived, user-visible status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Identity used to match the notification with its dismissal timer
    pub id: Uuid,
    /// Message text
    pub text: String,
    /// Category
    pub kind: NotificationKind,
    /// When the notification was shown
    pub created_at: DateTime<Utc>,
    /// How long it stays visible
    pub ttl: Duration,
}

impl Notification {
    fn new(text: impl Into<String>, kind: NotificationKind, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            created_at: Utc::now(),
            ttl,
        }
    }
}

struct Slot {
    current: watch::Sender<Option<Notification>>,
    timer: Mutex<Option<AbortHandle>>,
}

impl Slot {
    fn expire(&self, id: Uuid) {
        let cleared = self.current.send_if_modified(|current| {
            if current.as_ref().is_some_and(|n| n.id == id) {
                *current = None;
                true
            } else {
                false
            }
        });
        trace!(%id, cleared, "Notification timer fired");
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
    }
}

/// Shows one notification at a time with auto-dismissal
///
/// Cloning yields another handle to the same slot. Dismissal timers are
/// tokio tasks spawned on the runtime that was current when the scheduler
/// was created, or failing that the one current at `show`. Without any
/// runtime the notification is still shown but stays until superseded or
/// dismissed.
#[derive(Clone)]
pub struct NotificationScheduler {
    slot: Arc<Slot>,
    runtime: Option<Handle>,
}

impl Default for NotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationScheduler {
    /// Create an empty scheduler bound to the current runtime, if any
    #[must_use]
    pub fn new() -> Self {
        Self::with_runtime(Handle::try_current().ok())
    }

    /// Create an empty scheduler whose timers run on `runtime`
    #[must_use]
    pub fn with_runtime(runtime: Option<Handle>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            slot: Arc::new(Slot {
                current,
                timer: Mutex::new(None),
            }),
            runtime,
        }
    }

    /// Display `text` now, replacing whatever is visible, and dismiss it after `ttl`
    #[allow(clippy::must_use_candidate)] // Mostly called for the side effect
    pub fn show(
        &self,
        text: impl Into<String>,
        kind: NotificationKind,
        ttl: Duration,
    ) -> Notification {
        let notification = Notification::new(text, kind, ttl);
        let id = notification.id;

        let mut timer = self.slot.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        self.slot.current.send_replace(Some(notification.clone()));

        *timer = self.arm(id, ttl);
        drop(timer);

        trace!(%id, ?kind, ?ttl, "Notification shown");
        notification
    }

    fn arm(&self, id: Uuid, ttl: Duration) -> Option<AbortHandle> {
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(%id, "No tokio runtime; notification will not auto-dismiss");
            return None;
        };

        let slot: Weak<Slot> = Arc::downgrade(&self.slot);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(slot) = slot.upgrade() {
                slot.expire(id);
            }
        });
        Some(handle.abort_handle())
    }

    /// Clear the visible notification and cancel its timer; idempotent
    pub fn dismiss(&self) {
        if let Some(timer) = self.slot.timer.lock().take() {
            timer.abort();
        }
        self.slot.current.send_if_modified(|current| current.take().is_some());
    }

    /// The visible notification, if any
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot.current.borrow().clone()
    }

    /// Observe the visible notification as it changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.current.subscribe()
    }
}

//! Client-side contact submission workflow
//!
//! - [`SubmissionForm`] / [`FormField`]: field state of one form session
//! - [`LifecycleState`]: `Closed`, `Open`, `AwaitingConfirmation`, `Sending`, `Settled`
//! - [`NotificationScheduler`]: one transient message at a time, owned timers
//! - [`SubmissionController`]: the state machine tying them to a [`crate::client::RelayClient`]
//!
//! The presentation layer feeds user intent into the controller and renders
//! from [`ControllerSnapshot`] and the visible [`Notification`].

mod controller;
mod form;
mod lifecycle;
mod notification;

pub use controller::{
    Confirmation, ControllerError, ControllerSnapshot, SubmissionController, FAILURE_MESSAGE,
    SENDING_MESSAGE, SUCCESS_MESSAGE, VALIDATION_MESSAGE,
};
pub use form::{FormField, SubmissionForm};
pub use lifecycle::LifecycleState;
pub use notification::{Notification, NotificationKind, NotificationScheduler};

//! folio-contact: contact-form submission workflow and mail relay
//!
//! Two halves joined by a small JSON contract ([`wire`]):
//! - **Submission** ([`submission`]): a client-side state machine that owns
//!   the form, the confirmation step, the single in-flight request and the
//!   transient notification shown to the visitor
//! - **Relay** ([`relay`]): a stateless HTTP endpoint that validates a
//!   submission and hands one email to the configured transport ([`email`])
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio_contact::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ContactConfig::load()?;
//!     let app = router(AppState::new(config.clone()));
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod relay;
pub mod serve;
pub mod state;
pub mod submission;
pub mod testing;
pub mod wire;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use folio_contact::prelude::*;
    //! ```

    pub use crate::client::{HttpRelayClient, RelayClient, RelayClientError};
    pub use crate::config::{ClientSettings, ContactConfig, MailBackend, RelaySettings, ServerSettings, SmtpSettings};
    pub use crate::email::{ConsoleBackend, Email, EmailError, EmailSender, SmtpBackend};
    pub use crate::error::ContactError;
    pub use crate::relay::{router, ContactPayload, MailRelay, RelayOutcome, RelayRejection};
    pub use crate::state::AppState;
    pub use crate::submission::{
        Confirmation, ControllerError, ControllerSnapshot, FormField, LifecycleState,
        Notification, NotificationKind, SubmissionController,
    };
    pub use crate::wire::{RelayRequest, RelayResponse, RelayResult};

    pub use axum;
}

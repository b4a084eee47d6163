//! Outbound email composition and delivery
//!
//! This module provides the mail side of the relay:
//! - A transport-agnostic [`Email`] message with a fluent builder
//! - The [`EmailSender`] trait implemented by every backend
//! - An SMTP backend (production) and a console backend (development)
//! - Askama templates for the contact notification email
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio_contact::config::SmtpSettings;
//! use folio_contact::email::{Email, EmailSender, SmtpBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SmtpBackend::new(SmtpSettings::default());
//!
//! let email = Email::new()
//!     .to("owner@example.com")
//!     .from("Portfolio <mailer@example.com>")
//!     .subject("Message from Ada")
//!     .text("Hello!");
//!
//! backend.send(email).await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod builder;
mod error;
mod sender;
mod template;

pub use backend::{console::ConsoleBackend, smtp::SmtpBackend};
pub use builder::Email;
pub use error::EmailError;
pub use sender::EmailSender;
pub use template::{ContactEmail, EmailTemplate};

#[cfg(test)]
pub use sender::MockEmailSender;

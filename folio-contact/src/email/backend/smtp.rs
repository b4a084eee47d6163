//! SMTP backend for sending emails
//!
//! Uses the `lettre` crate to deliver through an authenticated SMTP relay.

use async_trait::async_trait;
use lettre::{
    message::{header, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpSettings;
use crate::email::{Email, EmailError, EmailSender};

/// SMTP email backend
///
/// Credentials come from the injected [`SmtpSettings`]; a backend built
/// without them still constructs, and every `send` fails with
/// [`EmailError::ConfigError`] before touching the network.
#[derive(Debug, Clone)]
pub struct SmtpBackend {
    settings: SmtpSettings,
}

impl SmtpBackend {
    /// Create a new SMTP backend with the given settings
    #[must_use]
    pub const fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
        address
            .parse()
            .map_err(|_| EmailError::InvalidAddress(address.to_string()))
    }

    /// Build lettre Message from Email
    fn build_message(email: &Email) -> Result<Message, EmailError> {
        email.validate()?;

        let from_addr = email.from.as_ref().ok_or(EmailError::NoSender)?;
        let mut builder = Message::builder().from(Self::parse_mailbox(from_addr)?);

        for to_addr in &email.to {
            builder = builder.to(Self::parse_mailbox(to_addr)?);
        }

        if let Some(reply_to_addr) = &email.reply_to {
            builder = builder.reply_to(Self::parse_mailbox(reply_to_addr)?);
        }

        let subject = email.subject.as_ref().ok_or(EmailError::NoSubject)?;
        builder = builder.subject(subject);

        let message = if let (Some(html), Some(text)) = (&email.html, &email.text) {
            builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_PLAIN)
                                .body(text.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_HTML)
                                .body(html.clone()),
                        ),
                )
                .map_err(|e| EmailError::smtp(e.to_string()))?
        } else if let Some(html) = &email.html {
            builder
                .header(header::ContentType::TEXT_HTML)
                .body(html.clone())
                .map_err(|e| EmailError::smtp(e.to_string()))?
        } else if let Some(text) = &email.text {
            builder
                .header(header::ContentType::TEXT_PLAIN)
                .body(text.clone())
                .map_err(|e| EmailError::smtp(e.to_string()))?
        } else {
            return Err(EmailError::NoContent);
        };

        Ok(message)
    }

    /// Create SMTP transport from settings
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let (username, password) = self
            .settings
            .credentials()
            .ok_or_else(|| EmailError::config("SMTP credentials are not configured"))?;
        let credentials = Credentials::new(username.to_string(), password.to_string());

        let transport = if self.settings.use_tls {
            let tls_parameters = TlsParameters::new(self.settings.host.clone())
                .map_err(|e| EmailError::smtp(format!("TLS parameters error: {e}")))?;

            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
                .map_err(|e| EmailError::smtp(e.to_string()))?
                .credentials(credentials)
                .tls(Tls::Required(tls_parameters))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.host)
                .credentials(credentials)
        };

        Ok(transport
            .port(self.settings.port)
            .timeout(Some(self.settings.timeout()))
            .build())
    }
}

#[async_trait]
impl EmailSender for SmtpBackend {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        let transport = self.create_transport()?;
        let message = Self::build_message(&email)?;

        transport
            .send(message)
            .await
            .map_err(|e| EmailError::smtp(e.to_string()))?;

        tracing::debug!(host = %self.settings.host, to = ?email.to, "SMTP delivery accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_email() -> Email {
        Email::new()
            .to("owner@example.com")
            .from("Portfolio <mailer@example.com>")
            .reply_to("ada@example.com")
            .subject("Message from Ada")
    }

    #[test]
    fn test_build_message_simple() {
        let email = contact_email().text("Hello");
        assert!(SmtpBackend::build_message(&email).is_ok());
    }

    #[test]
    fn test_build_message_with_html_and_text() {
        let email = contact_email().text("Hello").html("<p>Hello</p>");
        assert!(SmtpBackend::build_message(&email).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_reply_to() {
        let email = contact_email().reply_to("not an address").text("Hello");
        assert!(matches!(
            SmtpBackend::build_message(&email),
            Err(EmailError::InvalidAddress(addr)) if addr == "not an address"
        ));
    }

    #[tokio::test]
    async fn test_send_without_credentials_fails_before_connecting() {
        let backend = SmtpBackend::new(SmtpSettings::default());

        let result = backend.send(contact_email().text("Hello")).await;

        assert!(matches!(result, Err(EmailError::ConfigError(_))));
    }
}

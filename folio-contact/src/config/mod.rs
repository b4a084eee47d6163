//! Configuration management for folio-contact
//!
//! Configuration is loaded once at process start from multiple sources with
//! clear precedence:
//!
//! 1. Environment variables (highest priority, `FOLIO_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/folio-contact/config.toml` (user config, XDG)
//! 4. `/etc/folio-contact/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `FOLIO_SECTION__FIELD_NAME`
//! - Use `__` (double underscore) to separate nested sections
//! - Use `_` (single underscore) within field names
//! - Example: `FOLIO_SMTP__PASSWORD=app-password`
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! relay_path = "/api/contact"
//! allowed_origins = ["https://portfolio.example.com"]
//!
//! [relay]
//! recipient = "owner@example.com"
//! sender_name = "Portfolio"
//! backend = "smtp"
//!
//! [smtp]
//! host = "smtp.gmail.com"
//! port = 587
//! username = "portfolio.mailer@gmail.com"
//! # password comes from FOLIO_SMTP__PASSWORD
//!
//! [client]
//! relay_url = "https://portfolio.example.com/api/contact"
//! request_timeout_ms = 10000
//! ```
//!
//! Credentials are never read by the relay itself: the loaded
//! [`ContactConfig`] is handed to [`crate::relay::MailRelay`] at construction.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ContactError;

const APP_DIR: &str = "folio-contact";
const ENV_PREFIX: &str = "FOLIO_";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Path the relay handler is mounted on
    pub relay_path: String,

    /// Maximum accepted request body in bytes
    pub body_limit_bytes: usize,

    /// Origins allowed to call the relay from a browser (CORS); empty disables CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            relay_path: "/api/contact".to_string(),
            body_limit_bytes: 64 * 1024,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerSettings {
    /// Socket address string suitable for `TcpListener::bind`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which transport the relay hands composed messages to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailBackend {
    /// Deliver through the configured SMTP server
    #[default]
    Smtp,
    /// Log messages instead of delivering them (development)
    Console,
}

/// Mail relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Fixed recipient of every contact message
    pub recipient: String,

    /// Display name used in the `From` header
    pub sender_name: String,

    /// Subject prefix; the submitter's name is appended
    pub subject_prefix: String,

    /// Transport backend
    pub backend: MailBackend,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            recipient: "owner@example.com".to_string(),
            sender_name: "Portfolio".to_string(),
            subject_prefix: "Message from".to_string(),
            backend: MailBackend::Smtp,
        }
    }
}

/// SMTP transport configuration
///
/// `username` doubles as the envelope sender address. Missing credentials are
/// reported when a delivery is attempted, not at load time.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port (usually 587 for STARTTLS)
    pub port: u16,

    /// Account identity
    pub username: Option<String>,

    /// Account secret
    pub password: Option<String>,

    /// Use STARTTLS (default: true)
    pub use_tls: bool,

    /// Transport timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: None,
            password: None,
            use_tls: true,
            timeout_secs: 30,
        }
    }
}

impl SmtpSettings {
    /// Username and password, if both are present and non-empty
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }

    /// Transport timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("use_tls", &self.use_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Submission controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Relay endpoint the controller posts to
    pub relay_url: String,

    /// Deadline for one relay request in milliseconds
    pub request_timeout_ms: u64,

    /// Lifetime of validation/success/failure notifications in milliseconds
    pub notification_ttl_ms: u64,

    /// Lifetime of the "sending" notification in milliseconds
    pub in_flight_ttl_ms: u64,

    /// How long the controller holds `Settled` before the final state, in
    /// milliseconds; `0` only yields once to other tasks
    pub settle_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:3000/api/contact".to_string(),
            request_timeout_ms: 10_000,
            notification_ttl_ms: 3_000,
            in_flight_ttl_ms: 10_000,
            settle_ms: 0,
        }
    }
}

impl ClientSettings {
    /// Deadline for one relay request
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Lifetime of outcome notifications
    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Lifetime of the in-flight notification
    #[must_use]
    pub const fn in_flight_ttl(&self) -> Duration {
        Duration::from_millis(self.in_flight_ttl_ms)
    }

    /// Pause between `Settled` and the final state
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Complete folio-contact configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Relay composition settings
    #[serde(default)]
    pub relay: RelaySettings,

    /// SMTP transport settings
    #[serde(default)]
    pub smtp: SmtpSettings,

    /// Submission controller settings
    #[serde(default)]
    pub client: ClientSettings,
}

impl ContactConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A configuration file exists but cannot be parsed
    /// - Environment variables hold values of the wrong type
    pub fn load() -> Result<Self, ContactError> {
        let mut figment = Self::defaults()?;

        let system_config = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Ok(figment.merge(Self::env()).extract()?)
    }

    /// Load configuration from a specific file, with environment overrides
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or values have the wrong type
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ContactError> {
        Ok(Self::defaults()?
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env())
            .extract()?)
    }

    /// Recommended per-user configuration path (`~/.config/folio-contact/config.toml`)
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Copy of this configuration with secrets masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.smtp.password.is_some() {
            copy.smtp.password = Some("***".to_string());
        }
        copy
    }

    fn defaults() -> Result<Figment, ContactError> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
    }
}

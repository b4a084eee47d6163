//! Error types and error handling

use thiserror::Error;

/// Application-level error type
///
/// Library components report their own narrower errors
/// ([`crate::email::EmailError`], [`crate::relay::RelayRejection`],
/// [`crate::client::RelayClientError`], [`crate::submission::ControllerError`]);
/// this type covers process setup and serving.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Default configuration could not be serialized
    #[error("Configuration serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Socket or filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

//! Client side of the relay wire contract
//!
//! The submission controller never talks HTTP directly; it goes through a
//! [`RelayClient`], which keeps the controller testable against stubs and
//! lets the transport change without touching the workflow.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::wire::{RelayRequest, RelayResult};

pub use self::http::HttpRelayClient;

/// Errors raised when the relay could not be consulted at all
#[derive(Debug, Error)]
pub enum RelayClientError {
    /// Connection refused, reset, DNS failure and similar
    #[error("network error: {0}")]
    Network(String),

    /// The relay answered with a body that is not a relay response
    #[error("invalid relay response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed
    #[error("client configuration error: {0}")]
    Config(String),
}

/// Sends one [`RelayRequest`] to the relay
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Submit a request and report the relay's verdict
    ///
    /// A relay that answers with a failure is `Ok(RelayResult::Failed(_))`;
    /// `Err` is reserved for requests that never got an answer.
    ///
    /// # Errors
    ///
    /// Returns [`RelayClientError`] if the relay is unreachable or its answer
    /// cannot be decoded
    async fn submit(&self, request: RelayRequest) -> Result<RelayResult, RelayClientError>;
}

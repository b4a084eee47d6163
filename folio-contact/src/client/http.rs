//! `reqwest`-backed relay client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{RelayClient, RelayClientError};
use crate::wire::{RelayRequest, RelayResponse, RelayResult};

/// Posts relay requests as JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: Client,
    url: String,
}

impl HttpRelayClient {
    /// Create a client for the relay at `url`
    ///
    /// No request timeout is set here; the controller owns the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`RelayClientError::Config`] if the TLS backend cannot be initialised
    pub fn new(url: impl Into<String>) -> Result<Self, RelayClientError> {
        let client = Client::builder()
            .user_agent(concat!("folio-contact/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Relay endpoint this client posts to
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn submit(&self, request: RelayRequest) -> Result<RelayResult, RelayClientError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!(%status, url = %self.url, "Relay answered");

        let body = response.text().await.map_err(|e| RelayClientError::Network(e.to_string()))?;
        let parsed = serde_json::from_str::<RelayResponse>(&body);

        if status.is_success() {
            let relay_response =
                parsed.map_err(|e| RelayClientError::InvalidResponse(e.to_string()))?;
            return Ok(if relay_response.success {
                RelayResult::Delivered
            } else {
                RelayResult::Failed(
                    relay_response
                        .error
                        .unwrap_or_else(|| "relay reported failure".to_string()),
                )
            });
        }

        let reason = parsed
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Ok(RelayResult::Failed(reason))
    }
}

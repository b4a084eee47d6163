//! Scripted relay client

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{RelayClient, RelayClientError};
use crate::wire::{RelayRequest, RelayResult};

#[derive(Debug)]
enum Reply {
    Result(RelayResult),
    Unreachable(String),
}

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Reply>,
    requests: Vec<RelayRequest>,
}

/// Relay client that answers from a script and records every request
///
/// When the script runs out it answers `Delivered`. Clones share the same
/// script and record.
#[derive(Debug, Clone, Default)]
pub struct StubRelayClient {
    script: Arc<Mutex<Script>>,
}

impl StubRelayClient {
    /// Stub that always answers `Delivered`
    #[must_use]
    pub fn delivering() -> Self {
        Self::default()
    }

    /// Stub whose next answer is `result`
    #[must_use]
    pub fn answering(result: RelayResult) -> Self {
        Self::default().then(result)
    }

    /// Queue `result` as the next answer
    #[must_use]
    pub fn then(self, result: RelayResult) -> Self {
        self.script.lock().replies.push_back(Reply::Result(result));
        self
    }

    /// Queue a network failure as the next answer
    #[must_use]
    pub fn then_unreachable(self, reason: impl Into<String>) -> Self {
        self.script
            .lock()
            .replies
            .push_back(Reply::Unreachable(reason.into()));
        self
    }

    /// Number of requests received
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.script.lock().requests.len()
    }

    /// Every request received, in order
    #[must_use]
    pub fn requests(&self) -> Vec<RelayRequest> {
        self.script.lock().requests.clone()
    }
}

#[async_trait]
impl RelayClient for StubRelayClient {
    async fn submit(&self, request: RelayRequest) -> Result<RelayResult, RelayClientError> {
        let mut script = self.script.lock();
        script.requests.push(request);
        match script.replies.pop_front() {
            None => Ok(RelayResult::Delivered),
            Some(Reply::Result(result)) => Ok(result),
            Some(Reply::Unreachable(reason)) => Err(RelayClientError::Network(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RelayRequest {
        RelayRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let stub = StubRelayClient::answering(RelayResult::Failed("smtp_error".to_string()))
            .then_unreachable("connection refused");
        let handle = stub.clone();

        assert_eq!(
            stub.submit(request()).await.unwrap(),
            RelayResult::Failed("smtp_error".to_string())
        );
        assert!(matches!(
            stub.submit(request()).await,
            Err(RelayClientError::Network(_))
        ));
        assert_eq!(stub.submit(request()).await.unwrap(), RelayResult::Delivered);

        assert_eq!(handle.call_count(), 3);
        assert_eq!(handle.requests()[0], request());
    }
}

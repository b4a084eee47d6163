//! Testing utilities
//!
//! Recording doubles for both sides of the relay contract, usable from unit
//! tests and from the integration tests under `tests/`:
//! - [`RecordingEmailSender`]: captures composed emails, optionally failing
//! - [`StubRelayClient`]: answers with scripted relay results and counts calls

mod email;
mod relay;

pub use email::RecordingEmailSender;
pub use relay::StubRelayClient;

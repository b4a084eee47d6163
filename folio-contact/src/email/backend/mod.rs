//! Email backend implementations
//!
//! - **SMTP**: deliver through an authenticated SMTP relay (production)
//! - **Console**: log messages instead of sending them (development)

pub mod console;
pub mod smtp;

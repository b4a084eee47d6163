//! Logging setup
//!
//! Structured logging through `tracing`: pretty output in debug builds, JSON
//! lines in release builds. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
#[must_use]
pub const fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,folio_contact=trace,hyper=info,reqwest=info"
    } else {
        "info"
    }
}

/// Initialize the global subscriber
///
/// # Example
///
/// ```rust,no_run
/// use folio_contact::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Relay starting");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails if a global subscriber is already installed
pub fn init() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    #[cfg(debug_assertions)]
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .try_init()?;

    #[cfg(not(debug_assertions))]
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;

    Ok(())
}

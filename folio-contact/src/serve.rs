//! Relay server bootstrap

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ContactConfig;
use crate::error::ContactError;
use crate::relay::router;
use crate::state::AppState;

/// Bind `server.host:server.port` and serve the relay until Ctrl-C or SIGTERM
pub async fn serve(config: ContactConfig) -> Result<(), ContactError> {
    let listener = TcpListener::bind(config.server.bind_address()).await?;
    serve_on(listener, AppState::new(config)).await
}

/// Serve the relay on an already bound listener
///
/// Used directly by tests that bind port `0`.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ContactError> {
    let addr = listener.local_addr()?;
    info!(
        %addr,
        relay_path = %state.config().server.relay_path,
        backend = ?state.config().relay.backend,
        "Relay listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ContactError::ServerError(e.to_string()))?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

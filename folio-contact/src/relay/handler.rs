//! HTTP surface of the relay
//!
//! The relay route accepts every method so that the method check lives in
//! [`super::MailRelay::relay`] and produces the same `405` body regardless of
//! how the request arrived. A `POST` body that cannot be read as JSON is a
//! `400`, unless it ran past `server.body_limit_bytes`, which stays a `413`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::{ContactPayload, RelayOutcome, RelayRejection};
use crate::state::AppState;

/// Relay handler
///
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/contact \
///   -H 'content-type: application/json' \
///   -d '{"name":"Ada","email":"ada@example.com","message":"Hello"}'
/// ```
pub async fn contact(
    State(state): State<AppState>,
    method: Method,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> RelayOutcome {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection)
            if method == Method::POST && rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
        {
            warn!("Relay received oversized body");
            return RelayOutcome::Rejected(RelayRejection::BodyTooLarge);
        }
        Err(rejection) if method == Method::POST => {
            warn!(error = %rejection.body_text(), "Relay received malformed body");
            return RelayOutcome::Rejected(RelayRejection::MalformedBody(rejection.body_text()));
        }
        // Non-POST requests are rejected by the relay before the payload matters
        Err(_) => ContactPayload::default(),
    };

    state.relay().relay(&method, payload).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Build the relay router for `state`
///
/// Routes:
/// - `<server.relay_path>`: the relay (any method; only `POST` is accepted)
/// - `/health`: liveness check
#[must_use]
pub fn router(state: AppState) -> Router {
    let server = &state.config().server;

    let mut app = Router::new()
        .route(&server.relay_path, any(contact))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        );
    }

    app.with_state(state)
}

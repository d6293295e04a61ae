use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::metrics::get_metrics;
use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "gaccess-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe: ready once both the upstream key and the shared
/// bearer token are configured.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let gemini = state.gemini.is_configured();
    let proxy = state.config.proxy.is_configured();

    let status = if gemini && proxy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "gemini_api_key": gemini,
            "proxy_secret_token": proxy,
        })),
    )
}

pub async fn metrics() -> impl IntoResponse {
    get_metrics()
}

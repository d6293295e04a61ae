use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::utils::secrets_match;

use crate::startup::AppState;

/// Rejects requests whose `Authorization: Bearer <token>` does not match the
/// configured proxy secret. Runs before the body is read.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        tracing::warn!("Relay request without a bearer token");
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "Missing or invalid Authorization header"
        )));
    };

    let proxy = &state.config.proxy;
    let authorized = proxy.is_configured()
        && proxy
            .secret_token
            .as_ref()
            .is_some_and(|secret| secrets_match(token, secret.expose_secret()));

    if !authorized {
        tracing::warn!("Relay request with an invalid bearer token");
        return Err(AppError::Unauthorized(anyhow::anyhow!("Invalid token")));
    }

    Ok(next.run(req).await)
}

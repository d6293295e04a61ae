//! Authenticated pass-through to Gemini.
//!
//! Bearer authentication happens in [`crate::middleware::bearer`]; by the
//! time this handler runs the caller is trusted.

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use service_core::error::AppError;

use crate::services::ProviderError;
use crate::startup::AppState;

/// Forward `{ "prompt": .. }` to Gemini and hand the upstream body and
/// status back unchanged.
#[tracing::instrument(skip(state, body))]
pub async fn relay_prompt(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let prompt = prompt_from_body(&body)?;

    if !state.gemini.is_configured() {
        tracing::error!("Relay called but GEMINI_API_KEY is not configured");
        return Err(AppError::Misconfigured(
            "GEMINI_API_KEY not configured".to_string(),
        ));
    }

    let reply = state
        .gemini
        .generate_content(&prompt)
        .await
        .map_err(|e| match e {
            ProviderError::NotConfigured(msg) => AppError::Misconfigured(msg),
            other => {
                tracing::error!(error = %other, "Gemini request failed");
                AppError::BadGateway(other.to_string())
            }
        })?;

    tracing::info!(
        model = %state.gemini.model(),
        status = reply.status.as_u16(),
        "Relayed prompt to Gemini"
    );

    Ok((
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response())
}

/// Parse the relay body and return its non-empty `prompt` string.
/// Whitespace-only prompts are forwarded as given.
fn prompt_from_body(body: &[u8]) -> Result<String, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid JSON body")))?;

    value
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing prompt field")))
}

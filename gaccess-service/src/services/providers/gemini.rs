//! Gemini `generateContent` client.
//!
//! The relay forwards the upstream body untouched, so this client returns
//! raw bytes plus status instead of a parsed response. Response parsing is
//! only done by callers that need the text, via [`first_candidate_text`].

use super::ProviderError;
use crate::config::GeminiSettings;
use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

/// Upstream answer, kept opaque.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Check if the API key is set.
    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model,
            method,
            api_key
        )
    }

    /// Issue exactly one `generateContent` call for `prompt`.
    ///
    /// Any HTTP status is a successful return; only transport failures and
    /// a missing key are errors.
    pub async fn generate_content(&self, prompt: &str) -> Result<UpstreamReply, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::NotConfigured("GEMINI_API_KEY not configured".into()))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            model = %self.settings.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                body_len = body.len(),
                "Gemini API returned non-success status"
            );
        }

        Ok(UpstreamReply { status, body })
    }
}

/// Extract `candidates[0].content.parts[0].text` from a Gemini response body.
///
/// A `null` anywhere along the path counts as missing.
pub fn first_candidate_text(body: &[u8]) -> Result<String, ProviderError> {
    let response: Value = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(ProviderError::EmptyCompletion)
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

//! Text provider that goes through the relay's public contract.
//!
//! Sends `{"prompt": ..}` with the shared bearer token to a relay endpoint
//! (normally this service's own `/api/gemini`) and pulls the text out of the
//! forwarded Gemini response.

use super::gemini::first_candidate_text;
use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    prompt: &'a str,
}

/// Relay-backed text provider.
#[derive(Clone)]
pub struct RelayTextProvider {
    client: Client,
    relay_url: String,
    token: Option<Secret<String>>,
}

impl RelayTextProvider {
    pub fn new(relay_url: impl Into<String>, token: Option<Secret<String>>) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.into(),
            token,
        }
    }

    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    fn token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl TextProvider for RelayTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let token = self.token().ok_or_else(|| {
            ProviderError::NotConfigured("PROXY_SECRET_TOKEN not configured".to_string())
        })?;

        tracing::debug!(
            relay_url = %self.relay_url,
            prompt_len = prompt.len(),
            "Sending prompt to relay"
        );

        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(token)
            .json(&RelayRequest { prompt })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        first_candidate_text(&body)
    }

    fn is_configured(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> RelayTextProvider {
        RelayTextProvider::new(
            format!("{}/api/gemini", server.uri()),
            Some(Secret::new("test-token".to_string())),
        )
    }

    #[tokio::test]
    async fn sends_bearer_token_and_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/gemini"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({ "prompt": "Say hi" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "hi" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server).generate("Say hi").await.unwrap();
        assert_eq!(text, "hi");
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"error":{"code":429}}"#),
            )
            .mount(&server)
            .await;

        let err = provider(&server).generate("Say hi").await.unwrap_err();
        match err {
            ProviderError::Upstream { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, r#"{"error":{"code":429}}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_token_never_reaches_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = RelayTextProvider::new(format!("{}/api/gemini", server.uri()), None);
        assert!(!provider.is_configured());

        let err = provider.generate("Say hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}

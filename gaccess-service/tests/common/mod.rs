#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use gaccess_service::config::{ArticleSettings, GatewayConfig, GeminiSettings, ProxySettings};
use gaccess_service::startup::Application;
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::json;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-proxy-token";
pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-test";

/// Path the relay calls on the mocked Gemini server.
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service against a mocked Gemini server.
    pub async fn spawn(gemini: &MockServer) -> Self {
        Self::spawn_with(test_config(&gemini.uri())).await
    }

    pub async fn spawn_with(config: GatewayConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_relay(&self, token: Option<&str>, body: &str) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}/api/gemini", self.address))
            .header("content-type", "application/json")
            .body(body.to_string());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to send relay request")
    }

    pub async fn post_article(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/generate-article", self.address))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send article request")
    }
}

/// Fully configured settings pointing at `gemini_uri`, with no chapter pause
/// and a random port.
pub fn test_config(gemini_uri: &str) -> GatewayConfig {
    GatewayConfig {
        common: service_core::config::Config {
            port: 0,
            ..Default::default()
        },
        gemini: GeminiSettings {
            api_key: Some(Secret::new(TEST_API_KEY.to_string())),
            api_base: format!("{}/v1beta", gemini_uri),
            model: TEST_MODEL.to_string(),
        },
        proxy: ProxySettings {
            secret_token: Some(Secret::new(TEST_TOKEN.to_string())),
            relay_url: None,
        },
        article: ArticleSettings {
            chapter_delay: Duration::ZERO,
        },
    }
}

/// A Gemini `generateContent` success carrying `text`.
pub fn gemini_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }],
        "modelVersion": TEST_MODEL
    }))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

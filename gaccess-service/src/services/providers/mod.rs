//! Text-generation provider abstraction.
//!
//! The article generator only sees [`TextProvider`], so the relay-backed
//! implementation can be swapped for the scripted mock in tests.

pub mod gemini;
pub mod mock;
pub mod relay;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The endpoint answered with a non-success status.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("No text content in response")]
    EmptyCompletion,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A single-shot prompt-to-text completion service.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and return the first candidate's text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Whether the provider has the credentials it needs.
    fn is_configured(&self) -> bool;
}

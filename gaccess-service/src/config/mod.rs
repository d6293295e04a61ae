use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Gemini REST endpoint used when `GEMINI_API_BASE` is unset.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// Pause between chapter requests when `ARTICLE_CHAPTER_DELAY_MS` is unset.
const DEFAULT_CHAPTER_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub proxy: ProxySettings,
    pub article: ArticleSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Upstream API key. The relay answers 500 while this is unset.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ProxySettings {
    /// Shared bearer secret. Every relay call is rejected while unset.
    pub secret_token: Option<Secret<String>>,
    /// Relay endpoint the article generator calls. Defaults to this
    /// process's own `/api/gemini` once the listener is bound.
    pub relay_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArticleSettings {
    pub chapter_delay: Duration,
}

impl Default for ArticleSettings {
    fn default() -> Self {
        Self {
            chapter_delay: Duration::from_millis(DEFAULT_CHAPTER_DELAY_MS),
        }
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let chapter_delay_ms = get_env(
            "ARTICLE_CHAPTER_DELAY_MS",
            &DEFAULT_CHAPTER_DELAY_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("ARTICLE_CHAPTER_DELAY_MS is invalid: {}", e))
        })?;

        Ok(GatewayConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: get_secret("GEMINI_API_KEY"),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            },
            proxy: ProxySettings {
                secret_token: get_secret("PROXY_SECRET_TOKEN"),
                relay_url: env::var("RELAY_URL").ok().filter(|v| !v.trim().is_empty()),
            },
            article: ArticleSettings {
                chapter_delay: Duration::from_millis(chapter_delay_ms),
            },
        })
    }
}

impl GeminiSettings {
    pub fn is_configured(&self) -> bool {
        is_set(&self.api_key)
    }
}

impl ProxySettings {
    pub fn is_configured(&self) -> bool {
        is_set(&self.secret_token)
    }
}

fn is_set(secret: &Option<Secret<String>>) -> bool {
    secret
        .as_ref()
        .is_some_and(|s| !s.expose_secret().is_empty())
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Blank values count as unset.
fn get_secret(key: &str) -> Option<Secret<String>> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Secret::new)
}

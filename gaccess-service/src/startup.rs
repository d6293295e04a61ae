//! Application startup and lifecycle management.
//!
//! Builds the router (relay, article generator, health, metrics) and owns
//! the bound listener until the server stops.

use crate::config::GatewayConfig;
use crate::handlers;
use crate::middleware::require_bearer_token;
use crate::services::{ArticleGenerator, GeminiClient, RelayTextProvider, TextProvider};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, request_span},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub gemini: GeminiClient,
    pub articles: Arc<ArticleGenerator>,
}

impl AppState {
    /// Wire state around the given article text provider.
    pub fn new(config: GatewayConfig, text_provider: Arc<dyn TextProvider>) -> Self {
        let gemini = GeminiClient::new(config.gemini.clone());
        let articles = Arc::new(ArticleGenerator::new(
            text_provider,
            config.article.clone(),
        ));

        Self {
            config,
            gemini,
            articles,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let relay = Router::new()
        .route("/api/gemini", post(handlers::relay::relay_prompt))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_token));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/api/generate-article",
            post(handlers::article::generate_article),
        )
        .merge(relay)
        .layer(CorsLayer::permissive())
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and build the application.
    ///
    /// Port 0 binds a random port. Without `RELAY_URL` the article generator
    /// calls this process's own relay endpoint.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let relay_url = config
            .proxy
            .relay_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/api/gemini", port));

        let text_provider =
            RelayTextProvider::new(relay_url, config.proxy.secret_token.clone());

        tracing::info!(
            relay_url = %text_provider.relay_url(),
            model = %config.gemini.model,
            gemini_configured = config.gemini.is_configured(),
            proxy_token_configured = config.proxy.is_configured(),
            "Initialized relay and article generator"
        );

        let state = AppState::new(config, Arc::new(text_provider));
        let router = build_router(state);

        tracing::info!("gaccess-service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

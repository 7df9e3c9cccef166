// Library root - router and state, shared by main.rs and the integration tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use config::Config;
pub use error::RelayError;
use services::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(config.user_agent.clone(), config.upstream_timeout_secs)?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/proxy/tsunami", get(handlers::tsunami))
        .route("/api/proxy/wildfire", get(handlers::wildfire))
        .route("/api/proxy/weather", get(handlers::weather))
        .route("/api/proxy/flood", get(handlers::flood))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

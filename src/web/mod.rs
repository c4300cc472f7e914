//! HTTP surface: routing, shared state, server loop.

pub mod handlers;
pub mod pages;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::rate_provider::RateProvider;

pub struct AppState {
    pub provider: Arc<dyn RateProvider>,
    pub config: AppConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/rates", post(handlers::rates_page))
        .route(
            "/convert",
            get(handlers::convert_page).post(handlers::convert_submit),
        )
        .route("/health", get(handlers::health))
        .route("/api/rates", get(handlers::api_rates))
        .route("/api/rates/{code}", get(handlers::api_rate))
        .route("/api/convert", get(handlers::api_convert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, listen: &str) -> Result<()> {
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address: {listen}"))?;

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

pub mod chart;
pub mod config;
pub mod core;
pub mod providers;
pub mod rate_provider;
pub mod rates;
pub mod web;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::rate_provider::RateProvider;

pub async fn run(config_path: Option<&str>, listen_override: Option<&str>) -> Result<()> {
    info!("Cambio starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider: Arc<dyn RateProvider> = Arc::new(
        providers::awesome_api::AwesomeApiProvider::new(&config.provider.base_url),
    );

    let listen = listen_override
        .map(str::to_string)
        .unwrap_or_else(|| config.server.listen.clone());

    let state = Arc::new(web::AppState { provider, config });
    web::serve(state, &listen).await
}

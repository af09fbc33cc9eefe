use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tadow_assistant::{
    config::AppConfig, routes, services::catalog::Catalog, state::AppState,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::demo(),
    };

    let state = Arc::new(AppState::new(&config, catalog));

    // Idle session sweeper.
    let sessions = state.conversation.sessions().clone();
    let sweep_every = (config.session_ttl / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            sessions.purge_expired().await;
        }
    });

    let app = routes::create_router(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(bind = %config.bind, "tadow assistant listening");
    axum::serve(listener, app).await?;
    Ok(())
}

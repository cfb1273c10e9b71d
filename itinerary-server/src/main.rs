use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use itinerary_server::catalog::{Catalog, spawn_refresh};
use itinerary_server::config::ServerConfig;
use itinerary_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;

    // Serve from the disk cache while the first fetch is in flight
    let catalog = Catalog::new(config.catalog_source()?).with_cache(config.catalog_cache());
    if catalog.seed_from_cache().await.is_none() {
        info!(path = %config.cache_path.display(), "no fresh catalog cache on disk");
    }

    let refresh = spawn_refresh(catalog.clone(), config.refresh_interval);

    let state = AppState::new(catalog.clone(), config.planner.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        source = %catalog.source().describe(),
        "itinerary planner listening"
    );
    info!("  GET  /health                                   - Health check");
    info!("  GET  /api/catalog                              - Catalog status");
    info!("  POST /itinerary/plan                           - Plan a trip");
    info!("  POST /api/tourism/attractions/generate_plan/   - Plan a trip (planner page)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh.abort();
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

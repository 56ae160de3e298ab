//! Artsim API Server
//!
//! Boots the vector store (create + seed + index + load, idempotent)
//! and then serves the article endpoints. Bootstrap failure is fatal:
//! the listener never binds.

use artsim_api::{create_router, state::AppState};
use artsim_core::AppConfig;
use artsim_store::{bootstrap, ArticleService, QdrantStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "artsim_api=debug,artsim_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Construct the store client once and run the bootstrap state
    // machine to completion before anything can reach a handler.
    let store = Arc::new(QdrantStore::new(&config.store).await?);
    bootstrap::ensure_ready(store.as_ref(), &config.store).await?;

    // Create application state
    let service = ArticleService::new(store);
    let state = Arc::new(AppState::new(config, service));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Artsim API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

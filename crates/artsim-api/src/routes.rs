//! API route definitions

use crate::handlers::{articles, health};
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create all API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Article endpoints (read-only; writes have no API surface)
        .route("/api/articles", get(articles::list_articles))
        .route("/api/articles/:id", get(articles::get_article))
        .route("/api/articles/:id/similar", get(articles::similar_articles))
        // Probes
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
}

//! Artsim API - REST server
//!
//! HTTP surface over the query service: article lookup, listing, and
//! similarity search, plus health probes and Swagger UI.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the application router with CORS, request tracing, and
/// API docs.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .merge(routes::api_routes())
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Permissive when no origins are configured, mirroring the open CORS
/// policy the service has always served with; otherwise restricted to
/// the configured list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

//! HTTP API layer with Axum routes and presentation formatting.
//!
//! This crate provides:
//! - REST API routes for the dashboard catalogue and the sales dashboard
//! - Display formatting for money, percentages and margin tones
//! - Response types consumed by the chart and table front end

pub mod presentation;
pub mod routes;

use axum::Router;
use salesboard_core::sales::ModelCatalogCache;
use salesboard_shared::config::{CacheConfig, DisplayConfig};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Models observed per date range, kept for a short time.
    pub models_cache: ModelCatalogCache,
    /// Display settings (currency symbol, "every model" label).
    pub display: Arc<DisplayConfig>,
}

impl AppState {
    /// Builds the state from an open connection and the cache/display settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, cache: &CacheConfig, display: DisplayConfig) -> Self {
        Self {
            db: Arc::new(db),
            models_cache: ModelCatalogCache::with_config(
                cache.model_capacity,
                Duration::from_secs(cache.model_ttl_secs),
            ),
            display: Arc::new(display),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

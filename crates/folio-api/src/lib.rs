//! # folio-api
//!
//! REST API layer for Folio. Provides HTTP endpoints for all CRUD operations,
//! authentication, and the admin dashboard.

pub mod auth;
pub mod middleware;
pub mod routes;

use axum::Router;
use folio_db::{Database, storage::StorageClient};
use std::sync::Arc;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// MinIO / S3-compatible object storage client for image uploads.
    pub storage: StorageClient,
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .merge(routes::auth::router())
        .merge(routes::users::router())
        .merge(routes::projects::router())
        .merge(routes::comments::router())
        .merge(routes::collections::router())
        .merge(routes::messages::router())
        .merge(routes::banners::router())
        .merge(routes::categories::router())
        .merge(routes::uploads::router())
        .merge(routes::admin::router(state.clone()))
        .merge(routes::health::router());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .with_state(state)
}

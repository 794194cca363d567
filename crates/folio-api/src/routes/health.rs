//! Health check route.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

/// GET /api/v1/health — liveness plus a database ping.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match folio_db::health_check(&state.db.pool).await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "down"
        }
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}

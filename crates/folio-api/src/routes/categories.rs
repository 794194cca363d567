//! Category routes.

use axum::{Json, Router, extract::State, routing::get};
use folio_common::error::FolioResult;
use folio_common::models::category::Category;
use folio_db::repository::categories;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/categories", get(list_categories))
}

#[derive(Serialize)]
struct CategoryListResponse {
    categories: Vec<Category>,
}

/// GET /api/v1/categories — full category tree, parents first.
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<CategoryListResponse>> {
    let categories = categories::list_all(&state.db.pool).await?;
    Ok(Json(CategoryListResponse { categories }))
}

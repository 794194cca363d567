//! Public promotional surfaces — banners per page, currently visible popups.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use folio_common::error::FolioResult;
use folio_common::models::banner::{Banner, Popup};
use folio_db::repository::{banners, popups};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Public banner/popup router. Admin CRUD lives under /admin.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/banners", get(list_banners))
        .route("/popups/active", get(list_popups))
}

#[derive(Deserialize)]
struct BannerQuery {
    page_type: Option<String>,
    active_only: Option<bool>,
}

#[derive(Serialize)]
struct BannerListResponse {
    banners: Vec<Banner>,
}

/// GET /api/v1/banners?page_type=&active_only=
///
/// Defaults to active banners only; pass `active_only=false` to see all.
async fn list_banners(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BannerQuery>,
) -> FolioResult<Json<BannerListResponse>> {
    let banners = banners::list_banners(
        &state.db.pool,
        query.page_type.as_deref(),
        query.active_only.unwrap_or(true),
    )
    .await?;
    Ok(Json(BannerListResponse { banners }))
}

#[derive(Serialize)]
struct PopupListResponse {
    popups: Vec<Popup>,
}

/// GET /api/v1/popups/active — popups active right now, inside their date window.
async fn list_popups(State(state): State<Arc<AppState>>) -> FolioResult<Json<PopupListResponse>> {
    let popups = popups::list_active(&state.db.pool).await?;
    Ok(Json(PopupListResponse { popups }))
}

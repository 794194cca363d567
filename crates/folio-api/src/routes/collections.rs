//! Collection routes — create, inspect, and curate project groupings.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, put},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::collection::{Collection, CreateCollectionRequest},
    models::project::ProjectResponse,
    validation::validate_request,
};
use folio_db::repository::{collections, projects};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext};

/// Collections router. Everything here is owner-scoped.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/collections", get(list_collections).post(create_collection))
        .route(
            "/collections/{id}",
            get(get_collection).delete(delete_collection),
        )
        .route(
            "/collections/{id}/items/{project_id}",
            put(add_item).delete(remove_item),
        )
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

#[derive(Serialize)]
struct CollectionListResponse {
    collections: Vec<Collection>,
}

/// GET /api/v1/collections — the caller's collections.
async fn list_collections(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<CollectionListResponse>> {
    let collections = collections::list_for_user(&state.db.pool, auth.user_id).await?;
    Ok(Json(CollectionListResponse { collections }))
}

/// POST /api/v1/collections
async fn create_collection(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCollectionRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<Collection>)> {
    validate_request(&body)?;
    folio_common::validation::validate_name(&body.name)?;

    let collection = collections::create_collection(
        &state.db.pool,
        Uuid::now_v7(),
        auth.user_id,
        body.name.trim(),
        body.description.as_deref(),
    )
    .await?;

    Ok((axum::http::StatusCode::CREATED, Json(collection)))
}

#[derive(Serialize)]
struct CollectionDetailResponse {
    #[serde(flatten)]
    collection: Collection,
    items: Vec<ProjectResponse>,
}

/// GET /api/v1/collections/:id — collection with its live projects.
async fn get_collection(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<CollectionDetailResponse>> {
    let collection = owned_collection(&state, &auth, id).await?;
    let items = collections::list_items(&state.db.pool, id).await?;

    Ok(Json(CollectionDetailResponse {
        collection,
        items: items.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/v1/collections/:id
async fn delete_collection(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<serde_json::Value>> {
    owned_collection(&state, &auth, id).await?;
    collections::delete_collection(&state.db.pool, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// PUT /api/v1/collections/:id/items/:project_id
async fn add_item(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((id, project_id)): Path<(Uuid, i64)>,
) -> FolioResult<Json<serde_json::Value>> {
    owned_collection(&state, &auth, id).await?;

    projects::find_row_by_id(&state.db.pool, project_id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    let added = collections::add_item(&state.db.pool, id, project_id).await?;
    Ok(Json(serde_json::json!({ "added": added })))
}

/// DELETE /api/v1/collections/:id/items/:project_id
async fn remove_item(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((id, project_id)): Path<(Uuid, i64)>,
) -> FolioResult<Json<serde_json::Value>> {
    owned_collection(&state, &auth, id).await?;
    let removed = collections::remove_item(&state.db.pool, id, project_id).await?;
    Ok(Json(serde_json::json!({ "removed": removed })))
}

/// 404 unless the collection exists; 403 unless the caller owns it.
async fn owned_collection(
    state: &AppState,
    auth: &AuthContext,
    id: Uuid,
) -> FolioResult<Collection> {
    let collection = collections::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Collection".into(),
        })?;

    if collection.user_id != auth.user_id {
        return Err(FolioError::Forbidden);
    }

    Ok(collection)
}

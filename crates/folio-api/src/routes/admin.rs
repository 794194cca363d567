//! Admin routes — dashboard stats, user management, moderation, and the
//! banner/popup CRUD behind the promotional surfaces.
//!
//! Every route here sits behind both the auth middleware and the admin gate;
//! the gate re-reads the caller's role from the database so a stale token
//! cannot keep admin access after a demotion.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post, put},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::banner::{
        Banner, CreateBannerRequest, CreatePopupRequest, Popup, UpdateBannerRequest,
        UpdatePopupRequest,
    },
    models::project::Project,
    models::user::UserResponse,
    validation::validate_request,
};
use folio_db::repository::{banners, comments, popups, projects, users};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;

/// Admin router. Takes the shared state up front so the admin gate can
/// check roles against the database.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/stats", get(stats))
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/role", patch(set_user_role))
        .route("/admin/users/{id}/active", patch(set_user_active))
        .route("/admin/projects", get(list_projects))
        .route(
            "/admin/projects/{id}",
            delete(delete_project),
        )
        .route("/admin/projects/{id}/restore", post(restore_project))
        .route("/admin/banners", post(create_banner))
        .route(
            "/admin/banners/{id}",
            put(update_banner).delete(delete_banner),
        )
        .route("/admin/popups", get(list_popups).post(create_popup))
        .route(
            "/admin/popups/{id}",
            put(update_popup).delete(delete_popup),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::admin_middleware,
        ))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

#[derive(Serialize)]
struct StatsResponse {
    user_count: i64,
    project_count: i64,
    comment_count: i64,
}

/// GET /api/v1/admin/stats
async fn stats(State(state): State<Arc<AppState>>) -> FolioResult<Json<StatsResponse>> {
    let user_count = users::count_users(&state.db.pool).await?;
    let project_count = projects::count_projects(&state.db.pool).await?;
    let comment_count = comments::count_comments(&state.db.pool).await?;
    Ok(Json(StatsResponse {
        user_count,
        project_count,
        comment_count,
    }))
}

#[derive(Deserialize)]
struct PageQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Serialize)]
struct AdminUserListResponse {
    users: Vec<UserResponse>,
}

/// GET /api/v1/admin/users
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> FolioResult<Json<AdminUserListResponse>> {
    let rows = users::list_users(
        &state.db.pool,
        page.limit.unwrap_or(50).clamp(1, 200),
        page.offset.unwrap_or(0).max(0),
    )
    .await?;
    Ok(Json(AdminUserListResponse {
        users: rows.into_iter().map(UserResponse::from).collect(),
    }))
}

#[derive(Deserialize)]
struct SetRoleRequest {
    role: String,
}

/// PATCH /api/v1/admin/users/:id/role
async fn set_user_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetRoleRequest>,
) -> FolioResult<Json<UserResponse>> {
    if body.role != "user" && body.role != "admin" {
        return Err(FolioError::Validation {
            message: format!("Unknown role '{}'", body.role),
        });
    }

    users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "User".into(),
        })?;

    let user = users::set_role(&state.db.pool, id, &body.role).await?;
    tracing::info!(user_id = %id, role = %body.role, "User role changed");
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
struct SetActiveRequest {
    active: bool,
}

/// PATCH /api/v1/admin/users/:id/active
async fn set_user_active(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetActiveRequest>,
) -> FolioResult<Json<UserResponse>> {
    users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "User".into(),
        })?;

    let user = users::set_active(&state.db.pool, id, body.active).await?;
    tracing::info!(user_id = %id, active = body.active, "User active flag changed");
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
struct AdminProjectQuery {
    include_deleted: Option<bool>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Serialize)]
struct AdminProjectListResponse {
    projects: Vec<Project>,
}

/// GET /api/v1/admin/projects — raw rows, optionally including deleted.
async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminProjectQuery>,
) -> FolioResult<Json<AdminProjectListResponse>> {
    let projects = projects::list_all(
        &state.db.pool,
        query.include_deleted.unwrap_or(false),
        query.limit.unwrap_or(50).clamp(1, 200),
        query.offset.unwrap_or(0).max(0),
    )
    .await?;
    Ok(Json(AdminProjectListResponse { projects }))
}

/// DELETE /api/v1/admin/projects/:id — moderation soft delete, any owner.
async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    projects::find_row_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    projects::soft_delete(&state.db.pool, id).await?;
    tracing::info!(project_id = id, "Project removed by moderation");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/v1/admin/projects/:id/restore
async fn restore_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    projects::find_row_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    projects::restore(&state.db.pool, id).await?;
    tracing::info!(project_id = id, "Project restored");
    Ok(Json(serde_json::json!({ "restored": true })))
}

/// POST /api/v1/admin/banners
async fn create_banner(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBannerRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<Banner>)> {
    validate_request(&body)?;

    let banner = banners::create_banner(
        &state.db.pool,
        &body.page_type,
        &body.title,
        &body.image_url,
        body.link_url.as_deref(),
        body.display_order.unwrap_or(0),
        body.is_active.unwrap_or(true),
    )
    .await?;

    Ok((axum::http::StatusCode::CREATED, Json(banner)))
}

/// PUT /api/v1/admin/banners/:id
async fn update_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBannerRequest>,
) -> FolioResult<Json<Banner>> {
    validate_request(&body)?;

    banners::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Banner".into(),
        })?;

    let banner = banners::update_banner(
        &state.db.pool,
        id,
        body.page_type.as_deref(),
        body.title.as_deref(),
        body.image_url.as_deref(),
        body.link_url.as_deref(),
        body.display_order,
        body.is_active,
    )
    .await?;

    Ok(Json(banner))
}

/// DELETE /api/v1/admin/banners/:id
async fn delete_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    let deleted = banners::delete_banner(&state.db.pool, id).await?;
    if !deleted {
        return Err(FolioError::NotFound {
            resource: "Banner".into(),
        });
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Serialize)]
struct PopupListResponse {
    popups: Vec<Popup>,
}

/// GET /api/v1/admin/popups — all popups, active or not.
async fn list_popups(State(state): State<Arc<AppState>>) -> FolioResult<Json<PopupListResponse>> {
    let popups = popups::list_all(&state.db.pool).await?;
    Ok(Json(PopupListResponse { popups }))
}

/// POST /api/v1/admin/popups
async fn create_popup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePopupRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<Popup>)> {
    validate_request(&body)?;

    let popup = popups::create_popup(
        &state.db.pool,
        &body.title,
        &body.image_url,
        body.link_url.as_deref(),
        body.starts_at,
        body.ends_at,
        body.is_active.unwrap_or(true),
    )
    .await?;

    Ok((axum::http::StatusCode::CREATED, Json(popup)))
}

/// PUT /api/v1/admin/popups/:id
async fn update_popup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePopupRequest>,
) -> FolioResult<Json<Popup>> {
    validate_request(&body)?;

    popups::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Popup".into(),
        })?;

    let popup = popups::update_popup(
        &state.db.pool,
        id,
        body.title.as_deref(),
        body.image_url.as_deref(),
        body.link_url.as_deref(),
        body.starts_at,
        body.ends_at,
        body.is_active,
    )
    .await?;

    Ok(Json(popup))
}

/// DELETE /api/v1/admin/popups/:id
async fn delete_popup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    let deleted = popups::delete_popup(&state.db.pool, id).await?;
    if !deleted {
        return Err(FolioError::NotFound {
            resource: "Popup".into(),
        });
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

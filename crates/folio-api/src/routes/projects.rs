//! Project routes — browse, publish, edit, and the like/bookmark wiring.

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, State},
    http::HeaderMap,
    middleware,
    routing::{get, post, put},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::project::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest},
    validation::validate_request,
};
use folio_db::repository::{bookmarks, categories, likes, projects};
use folio_db::views;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext};

/// Projects router.
pub fn router() -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/projects", post(create_project))
        .route(
            "/projects/{id}",
            put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/like", put(like_project).delete(unlike_project))
        .route(
            "/projects/{id}/bookmark",
            put(bookmark_project).delete(unbookmark_project),
        )
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware));

    let public = Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}/view", post(record_project_view))
        .route("/projects/{id}/likes", get(project_likes));

    protected.merge(public)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
    user_id: Option<Uuid>,
    search: Option<String>,
    limit: Option<i64>,
}

#[derive(Serialize)]
struct ProjectListResponse {
    projects: Vec<ProjectResponse>,
}

/// GET /api/v1/projects
///
/// Public listing, newest first. `category=all` (or `korea`, kept for older
/// clients) means no category filter.
async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> FolioResult<Json<ProjectListResponse>> {
    let config = folio_common::config::get();
    let default_limit = config.limits.default_page_size as i64;

    let category = query
        .category
        .filter(|c| c != "all" && c != "korea");

    let filter = projects::ProjectFilter {
        category,
        user_id: query.user_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
        limit: query.limit.unwrap_or(default_limit).clamp(1, 200),
    };

    let rows = projects::list_projects(&state.db.pool, &filter).await?;
    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Serialize)]
struct SingleProjectResponse {
    project: ProjectResponse,
}

/// POST /api/v1/projects
async fn create_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProjectRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<SingleProjectResponse>)> {
    validate_request(&body)?;

    // Category must exist
    categories::find_by_id(&state.db.pool, body.category_id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Category".into(),
        })?;

    let row = projects::create_project(
        &state.db.pool,
        auth.user_id,
        body.category_id,
        &body.title,
        body.content_text.as_deref(),
        body.rendering_type.as_deref(),
        body.custom_data.as_deref(),
        body.thumbnail_url.as_deref(),
    )
    .await?;

    tracing::info!(project_id = row.id, user_id = %auth.user_id, "Project published");

    let project = projects::find_by_id(&state.db.pool, row.id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(SingleProjectResponse {
            project: project.into(),
        }),
    ))
}

/// GET /api/v1/projects/:id
///
/// Fetching the detail page counts as a view. The bump is best-effort —
/// a counter failure never hides the project.
async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<SingleProjectResponse>> {
    let project = projects::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    let mut response: ProjectResponse = project.into();
    match views::record_view(&state.db.pool, id).await {
        Ok(count) => response.view_count = count,
        Err(e) => tracing::warn!(project_id = id, error = %e, "View count bump failed"),
    }

    Ok(Json(SingleProjectResponse { project: response }))
}

/// PUT /api/v1/projects/:id
async fn update_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProjectRequest>,
) -> FolioResult<Json<SingleProjectResponse>> {
    validate_request(&body)?;

    let row = projects::find_row_by_id(&state.db.pool, id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    // Only the owner can edit
    if row.user_id != auth.user_id {
        return Err(FolioError::Forbidden);
    }

    if let Some(category_id) = body.category_id {
        categories::find_by_id(&state.db.pool, category_id)
            .await?
            .ok_or(FolioError::NotFound {
                resource: "Category".into(),
            })?;
    }

    projects::update_project(
        &state.db.pool,
        id,
        body.category_id,
        body.title.as_deref(),
        body.content_text.as_deref(),
        body.rendering_type.as_deref(),
        body.custom_data.as_deref(),
        body.thumbnail_url.as_deref(),
    )
    .await?;

    let project = projects::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    Ok(Json(SingleProjectResponse {
        project: project.into(),
    }))
}

/// DELETE /api/v1/projects/:id — soft delete, owner only.
async fn delete_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    let row = projects::find_row_by_id(&state.db.pool, id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    if row.user_id != auth.user_id {
        return Err(FolioError::Forbidden);
    }

    projects::soft_delete(&state.db.pool, id).await?;
    tracing::info!(project_id = id, user_id = %auth.user_id, "Project deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/v1/projects/:id/view
///
/// Record one view through the fallback chain. Returns the new count.
async fn record_project_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    // 404 before touching the counter
    projects::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    let count = views::record_view(&state.db.pool, id).await?;
    Ok(Json(serde_json::json!({ "views": count })))
}

/// PUT /api/v1/projects/:id/like
async fn like_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    ensure_live_project(&state, id).await?;
    likes::add_like(&state.db.pool, auth.user_id, id).await?;
    let count = likes::count_likes(&state.db.pool, id).await?;
    Ok(Json(serde_json::json!({ "liked": true, "count": count })))
}

/// DELETE /api/v1/projects/:id/like
async fn unlike_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    likes::remove_like(&state.db.pool, auth.user_id, id).await?;
    let count = likes::count_likes(&state.db.pool, id).await?;
    Ok(Json(serde_json::json!({ "liked": false, "count": count })))
}

/// GET /api/v1/projects/:id/likes
///
/// Public count; `liked` reflects the caller when a valid token is attached.
async fn project_likes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> FolioResult<Json<serde_json::Value>> {
    ensure_live_project(&state, id).await?;

    let count = likes::count_likes(&state.db.pool, id).await?;

    let liked = match crate::middleware::bearer_user(&headers) {
        Some(user_id) => Some(likes::has_liked(&state.db.pool, user_id, id).await?),
        None => None,
    };

    Ok(Json(serde_json::json!({ "count": count, "liked": liked })))
}

/// PUT /api/v1/projects/:id/bookmark
async fn bookmark_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    ensure_live_project(&state, id).await?;
    bookmarks::add_bookmark(&state.db.pool, auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "bookmarked": true })))
}

/// DELETE /api/v1/projects/:id/bookmark
async fn unbookmark_project(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    bookmarks::remove_bookmark(&state.db.pool, auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "bookmarked": false })))
}

/// 404 unless the project exists and is not soft-deleted.
async fn ensure_live_project(state: &AppState, id: i64) -> FolioResult<()> {
    projects::find_row_by_id(&state.db.pool, id)
        .await?
        .filter(|p| !p.is_deleted)
        .map(|_| ())
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })
}

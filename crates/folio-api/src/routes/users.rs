//! User routes — own profile, public creator profiles, and the follow graph.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, put},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::project::ProjectResponse,
    models::user::{UpdateUserRequest, UserResponse, UserSummary},
    validation::validate_request,
};
use folio_db::repository::{bookmarks, follows, likes, projects, users};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext};

/// Users router.
pub fn router() -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/me/likes", get(my_likes))
        .route("/users/me/bookmarks", get(my_bookmarks))
        .route("/users/{id}/follow", put(follow_user).delete(unfollow_user))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware));

    let public = Router::new()
        .route("/users/{id}", get(get_profile))
        .route("/users/{id}/projects", get(user_projects))
        .route("/users/{id}/followers", get(list_followers))
        .route("/users/{id}/following", get(list_following));

    protected.merge(public)
}

/// GET /api/v1/users/me
async fn get_me(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<UserResponse>> {
    let user = users::find_by_id(&state.db.pool, auth.user_id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "User".into(),
        })?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/me
async fn update_me(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateUserRequest>,
) -> FolioResult<Json<UserResponse>> {
    validate_request(&body)?;

    let user = users::update_profile(
        &state.db.pool,
        auth.user_id,
        body.nickname.as_deref(),
        body.bio.as_deref(),
        body.profile_image_url.as_deref(),
        body.cover_image_url.as_deref(),
    )
    .await?;

    Ok(Json(user.into()))
}

/// Public profile with follower/following/project counts.
#[derive(Serialize)]
struct ProfileResponse {
    #[serde(flatten)]
    user: UserResponse,
    follower_count: i64,
    following_count: i64,
    project_count: i64,
    /// Whether the caller follows this creator; absent without a valid token
    is_followed: Option<bool>,
}

/// GET /api/v1/users/:id
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: axum::http::HeaderMap,
) -> FolioResult<Json<ProfileResponse>> {
    let user = users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "User".into(),
        })?;

    let follower_count = follows::count_followers(&state.db.pool, id).await?;
    let following_count = follows::count_following(&state.db.pool, id).await?;
    let project_count = projects::count_by_user(&state.db.pool, id).await?;

    let is_followed = match crate::middleware::bearer_user(&headers) {
        Some(caller) => Some(follows::is_following(&state.db.pool, caller, id).await?),
        None => None,
    };

    Ok(Json(ProfileResponse {
        user: user.into(),
        follower_count,
        following_count,
        project_count,
        is_followed,
    }))
}

#[derive(Serialize)]
struct ProjectListResponse {
    projects: Vec<ProjectResponse>,
}

/// GET /api/v1/users/:id/projects
async fn user_projects(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<ProjectListResponse>> {
    let config = folio_common::config::get();
    let filter = folio_db::repository::projects::ProjectFilter {
        user_id: Some(id),
        limit: config.limits.default_page_size as i64,
        ..Default::default()
    };
    let rows = projects::list_projects(&state.db.pool, &filter).await?;
    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/users/me/likes
async fn my_likes(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<ProjectListResponse>> {
    let rows = likes::list_liked_projects(&state.db.pool, auth.user_id).await?;
    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/users/me/bookmarks
async fn my_bookmarks(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<ProjectListResponse>> {
    let rows = bookmarks::list_bookmarked_projects(&state.db.pool, auth.user_id).await?;
    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// PUT /api/v1/users/:id/follow
async fn follow_user(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<serde_json::Value>> {
    if id == auth.user_id {
        return Err(FolioError::Validation {
            message: "Cannot follow yourself".into(),
        });
    }

    // Target must exist
    users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "User".into(),
        })?;

    let added = follows::follow(&state.db.pool, auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "following": true, "added": added })))
}

/// DELETE /api/v1/users/:id/follow
async fn unfollow_user(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<serde_json::Value>> {
    let removed = follows::unfollow(&state.db.pool, auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "following": false, "removed": removed })))
}

#[derive(Serialize)]
struct UserListResponse {
    users: Vec<UserSummary>,
}

/// GET /api/v1/users/:id/followers
async fn list_followers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<UserListResponse>> {
    let users = follows::list_followers(&state.db.pool, id).await?;
    Ok(Json(UserListResponse { users }))
}

/// GET /api/v1/users/:id/following
async fn list_following(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> FolioResult<Json<UserListResponse>> {
    let users = follows::list_following(&state.db.pool, id).await?;
    Ok(Json(UserListResponse { users }))
}

//! Comment routes — threaded listing, posting, and soft delete.

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, State},
    middleware,
    routing::{delete, get, post},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::comment::{CommentResponse, CreateCommentRequest, thread_comments},
    models::user::UserSummary,
    validation::validate_request,
};
use folio_db::repository::{comments, projects, users};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext};

/// Comments router.
pub fn router() -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware));

    let public = Router::new().route("/comments", get(list_comments));

    protected.merge(public)
}

#[derive(Deserialize)]
struct ListQuery {
    project_id: i64,
}

#[derive(Serialize)]
struct CommentListResponse {
    comments: Vec<CommentResponse>,
}

/// GET /api/v1/comments?project_id=
///
/// Non-deleted comments as a reply tree, newest roots first.
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> FolioResult<Json<CommentListResponse>> {
    let rows = comments::list_for_project(&state.db.pool, query.project_id).await?;

    // One author lookup for the whole page
    let author_ids: Vec<Uuid> = {
        let mut ids: Vec<Uuid> = rows.iter().map(|c| c.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };
    let authors: HashMap<Uuid, UserSummary> = users::summaries_by_ids(&state.db.pool, &author_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    Ok(Json(CommentListResponse {
        comments: thread_comments(rows, &authors),
    }))
}

/// POST /api/v1/comments
async fn create_comment(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCommentRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<CommentResponse>)> {
    validate_request(&body)?;

    // Project must exist and be live
    projects::find_row_by_id(&state.db.pool, body.project_id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(FolioError::NotFound {
            resource: "Project".into(),
        })?;

    // Replies must point at a live comment on the same project
    if let Some(parent_id) = body.parent_comment_id {
        let parent = comments::find_by_id(&state.db.pool, parent_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or(FolioError::NotFound {
                resource: "Parent comment".into(),
            })?;
        if parent.project_id != body.project_id {
            return Err(FolioError::Validation {
                message: "Parent comment belongs to a different project".into(),
            });
        }
    }

    let comment = comments::create_comment(
        &state.db.pool,
        body.project_id,
        auth.user_id,
        &body.content,
        body.parent_comment_id,
        body.mentioned_user_id,
    )
    .await?;

    let authors: HashMap<Uuid, UserSummary> =
        users::summaries_by_ids(&state.db.pool, &[auth.user_id])
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

    let mut threaded = thread_comments(vec![comment], &authors);
    let response = threaded.remove(0);

    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// DELETE /api/v1/comments/:id — soft delete, author only.
async fn delete_comment(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<serde_json::Value>> {
    let comment = comments::find_by_id(&state.db.pool, id)
        .await?
        .filter(|c| !c.is_deleted)
        .ok_or(FolioError::NotFound {
            resource: "Comment".into(),
        })?;

    if comment.user_id != auth.user_id {
        return Err(FolioError::Forbidden);
    }

    comments::soft_delete(&state.db.pool, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

//! Project model — the portfolio pieces creators publish.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::category::CategorySummary;
use super::user::UserSummary;

/// A published project row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,

    /// Owning creator
    pub user_id: Uuid,

    pub category_id: i32,

    pub title: String,

    /// Rich-text body (HTML produced by the editor)
    pub content_text: Option<String>,

    /// How the client should render the body ("editor", "image", "embed", ...)
    pub rendering_type: Option<String>,

    /// Opaque client payload for custom rendering types
    pub custom_data: Option<String>,

    pub thumbnail_url: Option<String>,

    /// Persisted view counter — see `folio_db::views` for increment semantics
    pub view_count: i64,

    /// Soft delete flag — deleted projects stay in the table
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create project request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be 1-120 characters"))]
    pub title: String,

    pub category_id: i32,

    #[validate(length(max = 100_000, message = "Content is too long"))]
    pub content_text: Option<String>,

    #[validate(length(max = 32))]
    pub rendering_type: Option<String>,

    pub custom_data: Option<String>,

    #[validate(url(message = "Invalid thumbnail URL"))]
    pub thumbnail_url: Option<String>,
}

/// Update project request — absent fields keep their current values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    pub category_id: Option<i32>,

    #[validate(length(max = 100_000))]
    pub content_text: Option<String>,

    #[validate(length(max = 32))]
    pub rendering_type: Option<String>,

    pub custom_data: Option<String>,

    #[validate(url)]
    pub thumbnail_url: Option<String>,
}

/// Project representation for API responses, with owner and category attached.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub content_text: Option<String>,
    pub rendering_type: Option<String>,
    pub custom_data: Option<String>,
    pub thumbnail_url: Option<String>,
    pub view_count: i64,
    pub owner: UserSummary,
    pub category: CategorySummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Joined row shape returned by the project list/detail queries.
#[derive(Debug, sqlx::FromRow)]
pub struct ProjectWithRefs {
    pub id: i64,
    pub user_id: Uuid,
    pub category_id: i32,
    pub title: String,
    pub content_text: Option<String>,
    pub rendering_type: Option<String>,
    pub custom_data: Option<String>,
    pub thumbnail_url: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_nickname: String,
    pub owner_profile_image_url: Option<String>,
    pub category_name: String,
}

impl From<ProjectWithRefs> for ProjectResponse {
    fn from(p: ProjectWithRefs) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content_text: p.content_text,
            rendering_type: p.rendering_type,
            custom_data: p.custom_data,
            thumbnail_url: p.thumbnail_url,
            view_count: p.view_count,
            owner: UserSummary {
                id: p.user_id,
                nickname: p.owner_nickname,
                profile_image_url: p.owner_profile_image_url,
            },
            category: CategorySummary {
                id: p.category_id,
                name: p.category_name,
            },
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

//! Bookmarks repository — the "save for later" list.

use folio_common::models::project::ProjectWithRefs;
use sqlx::PgPool;
use uuid::Uuid;

/// Bookmark a project. Returns true if newly added.
pub async fn add_bookmark(
    pool: &PgPool,
    user_id: Uuid,
    project_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO bookmarks (user_id, project_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, project_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(project_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a bookmark.
pub async fn remove_bookmark(
    pool: &PgPool,
    user_id: Uuid,
    project_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND project_id = $2")
        .bind(user_id)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// List a user's bookmarked projects, most recent bookmark first.
pub async fn list_bookmarked_projects(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ProjectWithRefs>, sqlx::Error> {
    sqlx::query_as::<_, ProjectWithRefs>(
        r#"
        SELECT p.id, p.user_id, p.category_id, p.title, p.content_text,
               p.rendering_type, p.custom_data, p.thumbnail_url, p.view_count,
               p.created_at, p.updated_at,
               u.nickname AS owner_nickname,
               u.profile_image_url AS owner_profile_image_url,
               c.name AS category_name
        FROM bookmarks b
        JOIN projects p ON p.id = b.project_id AND p.is_deleted = FALSE
        JOIN users u ON u.id = p.user_id
        JOIN categories c ON c.id = p.category_id
        WHERE b.user_id = $1
        ORDER BY b.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

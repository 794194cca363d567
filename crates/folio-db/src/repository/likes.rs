//! Likes repository — per-user project likes.

use folio_common::models::project::ProjectWithRefs;
use sqlx::PgPool;
use uuid::Uuid;

/// Like a project. Returns true if newly added, false if already liked.
pub async fn add_like(pool: &PgPool, user_id: Uuid, project_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (user_id, project_id, created_at)
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

/// Remove a like.
pub async fn remove_like(
    pool: &PgPool,
    user_id: Uuid,
    project_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND project_id = $2")
        .bind(user_id)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Count likes on a project.
pub async fn count_likes(pool: &PgPool, project_id: i64) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM likes WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Check whether a user has liked a project.
pub async fn has_liked(pool: &PgPool, user_id: Uuid, project_id: i64) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND project_id = $2)",
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// List the projects a user has liked, most recent like first.
pub async fn list_liked_projects(
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
        FROM likes l
        JOIN projects p ON p.id = l.project_id AND p.is_deleted = FALSE
        JOIN users u ON u.id = p.user_id
        JOIN categories c ON c.id = p.category_id
        WHERE l.user_id = $1
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

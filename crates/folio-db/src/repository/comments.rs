//! Comments repository — threaded discussion rows with soft delete.

use folio_common::models::comment::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a comment (optionally a reply with a mention).
pub async fn create_comment(
    pool: &PgPool,
    project_id: i64,
    user_id: Uuid,
    content: &str,
    parent_comment_id: Option<i64>,
    mentioned_user_id: Option<Uuid>,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments
            (project_id, user_id, content, parent_comment_id, mentioned_user_id,
             is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .bind(content)
    .bind(parent_comment_id)
    .bind(mentioned_user_id)
    .fetch_one(pool)
    .await
}

/// Find a comment by ID.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List non-deleted comments on a project, newest first.
pub async fn list_for_project(pool: &PgPool, project_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT * FROM comments
        WHERE project_id = $1 AND is_deleted = FALSE
        ORDER BY created_at DESC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Soft delete a comment — the row (and any replies) stays.
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE comments SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count live comments (admin dashboard).
pub async fn count_comments(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE is_deleted = FALSE")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

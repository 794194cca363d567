//! Project repository — listing with filters, CRUD, and soft delete.

use folio_common::models::project::{Project, ProjectWithRefs};
use sqlx::PgPool;
use uuid::Uuid;

/// Columns selected for the joined list/detail shape.
const WITH_REFS: &str = r#"
    SELECT p.id, p.user_id, p.category_id, p.title, p.content_text,
           p.rendering_type, p.custom_data, p.thumbnail_url, p.view_count,
           p.created_at, p.updated_at,
           u.nickname AS owner_nickname,
           u.profile_image_url AS owner_profile_image_url,
           c.name AS category_name
    FROM projects p
    JOIN users u ON u.id = p.user_id
    JOIN categories c ON c.id = p.category_id
"#;

/// Filters for the public project listing.
#[derive(Debug, Default)]
pub struct ProjectFilter {
    /// Category name ("all" is treated as no filter by the caller)
    pub category: Option<String>,
    /// Restrict to one creator
    pub user_id: Option<Uuid>,
    /// Substring match against title or body
    pub search: Option<String>,
    pub limit: i64,
}

/// List projects newest-first, excluding soft-deleted rows.
pub async fn list_projects(
    pool: &PgPool,
    filter: &ProjectFilter,
) -> Result<Vec<ProjectWithRefs>, sqlx::Error> {
    let sql = format!(
        r#"{WITH_REFS}
        WHERE p.is_deleted = FALSE
          AND ($1::text IS NULL OR c.name = $1)
          AND ($2::uuid IS NULL OR p.user_id = $2)
          AND ($3::text IS NULL
               OR p.title ILIKE '%' || $3 || '%'
               OR p.content_text ILIKE '%' || $3 || '%')
        ORDER BY p.created_at DESC
        LIMIT $4
        "#
    );

    sqlx::query_as::<_, ProjectWithRefs>(&sql)
        .bind(filter.category.as_deref())
        .bind(filter.user_id)
        .bind(filter.search.as_deref())
        .bind(filter.limit)
        .fetch_all(pool)
        .await
}

/// Find a live project by ID with owner and category attached.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ProjectWithRefs>, sqlx::Error> {
    let sql = format!("{WITH_REFS} WHERE p.id = $1 AND p.is_deleted = FALSE");
    sqlx::query_as::<_, ProjectWithRefs>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a raw project row regardless of deletion state (ownership checks, admin).
pub async fn find_row_by_id(pool: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a project.
#[allow(clippy::too_many_arguments)]
pub async fn create_project(
    pool: &PgPool,
    user_id: Uuid,
    category_id: i32,
    title: &str,
    content_text: Option<&str>,
    rendering_type: Option<&str>,
    custom_data: Option<&str>,
    thumbnail_url: Option<&str>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects
            (user_id, category_id, title, content_text, rendering_type,
             custom_data, thumbnail_url, view_count, is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 0, FALSE, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(category_id)
    .bind(title)
    .bind(content_text)
    .bind(rendering_type)
    .bind(custom_data)
    .bind(thumbnail_url)
    .fetch_one(pool)
    .await
}

/// Update project fields — absent values keep the current column.
#[allow(clippy::too_many_arguments)]
pub async fn update_project(
    pool: &PgPool,
    id: i64,
    category_id: Option<i32>,
    title: Option<&str>,
    content_text: Option<&str>,
    rendering_type: Option<&str>,
    custom_data: Option<&str>,
    thumbnail_url: Option<&str>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects SET
            category_id = COALESCE($2, category_id),
            title = COALESCE($3, title),
            content_text = COALESCE($4, content_text),
            rendering_type = COALESCE($5, rendering_type),
            custom_data = COALESCE($6, custom_data),
            thumbnail_url = COALESCE($7, thumbnail_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(category_id)
    .bind(title)
    .bind(content_text)
    .bind(rendering_type)
    .bind(custom_data)
    .bind(thumbnail_url)
    .fetch_one(pool)
    .await
}

/// Soft delete — the row stays, listings skip it.
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Undo a soft delete (admin moderation).
pub async fn restore(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET is_deleted = FALSE, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// List raw project rows for the admin dashboard, optionally including deleted.
pub async fn list_all(
    pool: &PgPool,
    include_deleted: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT * FROM projects
        WHERE ($1 OR is_deleted = FALSE)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(include_deleted)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count live projects (admin dashboard).
pub async fn count_projects(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE is_deleted = FALSE")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Count a creator's live projects (public profile).
pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM projects WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

//! Banners repository — admin-managed promotional strips.

use folio_common::models::banner::Banner;
use sqlx::PgPool;

/// List banners in display order, optionally restricted to a page and to
/// active rows only.
pub async fn list_banners(
    pool: &PgPool,
    page_type: Option<&str>,
    active_only: bool,
) -> Result<Vec<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        SELECT * FROM banners
        WHERE ($1::text IS NULL OR page_type = $1)
          AND (NOT $2 OR is_active)
        ORDER BY display_order ASC, id ASC
        "#,
    )
    .bind(page_type)
    .bind(active_only)
    .fetch_all(pool)
    .await
}

/// Find a banner by ID.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>("SELECT * FROM banners WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a banner (admin).
pub async fn create_banner(
    pool: &PgPool,
    page_type: &str,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    display_order: i32,
    is_active: bool,
) -> Result<Banner, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        INSERT INTO banners (page_type, title, image_url, link_url, display_order, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(page_type)
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(display_order)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Update banner fields (admin) — absent values keep the current column.
#[allow(clippy::too_many_arguments)]
pub async fn update_banner(
    pool: &PgPool,
    id: i64,
    page_type: Option<&str>,
    title: Option<&str>,
    image_url: Option<&str>,
    link_url: Option<&str>,
    display_order: Option<i32>,
    is_active: Option<bool>,
) -> Result<Banner, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        UPDATE banners SET
            page_type = COALESCE($2, page_type),
            title = COALESCE($3, title),
            image_url = COALESCE($4, image_url),
            link_url = COALESCE($5, link_url),
            display_order = COALESCE($6, display_order),
            is_active = COALESCE($7, is_active)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(page_type)
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(display_order)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Delete a banner (admin).
pub async fn delete_banner(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

//! Popups repository — site-wide announcements with a date window.

use folio_common::models::banner::Popup;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// List popups currently visible: active, and inside their date window.
pub async fn list_active(pool: &PgPool) -> Result<Vec<Popup>, sqlx::Error> {
    sqlx::query_as::<_, Popup>(
        r#"
        SELECT * FROM popups
        WHERE is_active
          AND (starts_at IS NULL OR starts_at <= NOW())
          AND (ends_at IS NULL OR ends_at >= NOW())
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// List all popups (admin).
pub async fn list_all(pool: &PgPool) -> Result<Vec<Popup>, sqlx::Error> {
    sqlx::query_as::<_, Popup>("SELECT * FROM popups ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Find a popup by ID.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Popup>, sqlx::Error> {
    sqlx::query_as::<_, Popup>("SELECT * FROM popups WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a popup (admin).
pub async fn create_popup(
    pool: &PgPool,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    is_active: bool,
) -> Result<Popup, sqlx::Error> {
    sqlx::query_as::<_, Popup>(
        r#"
        INSERT INTO popups (title, image_url, link_url, starts_at, ends_at, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(starts_at)
    .bind(ends_at)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Update popup fields (admin) — absent values keep the current column.
#[allow(clippy::too_many_arguments)]
pub async fn update_popup(
    pool: &PgPool,
    id: i64,
    title: Option<&str>,
    image_url: Option<&str>,
    link_url: Option<&str>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    is_active: Option<bool>,
) -> Result<Popup, sqlx::Error> {
    sqlx::query_as::<_, Popup>(
        r#"
        UPDATE popups SET
            title = COALESCE($2, title),
            image_url = COALESCE($3, image_url),
            link_url = COALESCE($4, link_url),
            starts_at = COALESCE($5, starts_at),
            ends_at = COALESCE($6, ends_at),
            is_active = COALESCE($7, is_active)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(starts_at)
    .bind(ends_at)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Delete a popup (admin).
pub async fn delete_popup(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM popups WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

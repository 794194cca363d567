//! User repository — CRUD operations for user accounts.

use folio_common::models::user::{User, UserSummary};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user account.
pub async fn create_user(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    password_hash: &str,
    nickname: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, nickname, role, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'user', TRUE, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(nickname)
    .fetch_one(pool)
    .await
}

/// Find a user by their unique ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a user by email (case-insensitive).
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Update user profile fields.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    nickname: Option<&str>,
    bio: Option<&str>,
    profile_image_url: Option<&str>,
    cover_image_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            nickname = COALESCE($2, nickname),
            bio = COALESCE($3, bio),
            profile_image_url = COALESCE($4, profile_image_url),
            cover_image_url = COALESCE($5, cover_image_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(nickname)
    .bind(bio)
    .bind(profile_image_url)
    .bind(cover_image_url)
    .fetch_one(pool)
    .await
}

/// Change a user's role (admin operation).
pub async fn set_role(pool: &PgPool, id: Uuid, role: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// Activate or deactivate an account (admin operation).
pub async fn set_active(pool: &PgPool, id: Uuid, active: bool) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(active)
    .fetch_one(pool)
    .await
}

/// List users newest-first (admin dashboard).
pub async fn list_users(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count active users (admin dashboard).
pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Fetch compact summaries for a set of users (comment/message author display).
pub async fn summaries_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        "SELECT id, nickname, profile_image_url FROM users WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

//! Messages repository — creator inbox and sent box.

use folio_common::models::message::Message;
use sqlx::PgPool;
use uuid::Uuid;

/// Send a message.
pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    recipient_id: Uuid,
    body: &str,
) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (sender_id, recipient_id, body, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .bind(body)
    .fetch_one(pool)
    .await
}

/// Find a message by ID.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List received messages, newest first.
pub async fn inbox(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        "SELECT * FROM messages WHERE recipient_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// List sent messages, newest first.
pub async fn sent(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        "SELECT * FROM messages WHERE sender_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Mark a message read. First read wins; the timestamp is not refreshed.
pub async fn mark_read(pool: &PgPool, id: i64) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        "UPDATE messages SET read_at = COALESCE(read_at, NOW()) WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

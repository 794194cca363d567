//! Collections repository — user-curated project groupings.

use folio_common::models::collection::Collection;
use folio_common::models::project::ProjectWithRefs;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a collection.
pub async fn create_collection(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    name: &str,
    description: Option<&str>,
) -> Result<Collection, sqlx::Error> {
    sqlx::query_as::<_, Collection>(
        r#"
        INSERT INTO collections (id, user_id, name, description, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Find a collection by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List a user's collections, newest first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>(
        "SELECT * FROM collections WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Delete a collection. Items cascade at the database level.
pub async fn delete_collection(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM collections WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Add a project to a collection. Returns true if newly added.
pub async fn add_item(
    pool: &PgPool,
    collection_id: Uuid,
    project_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO collection_items (collection_id, project_id, added_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (collection_id, project_id) DO NOTHING
        "#,
    )
    .bind(collection_id)
    .bind(project_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a project from a collection.
pub async fn remove_item(
    pool: &PgPool,
    collection_id: Uuid,
    project_id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM collection_items WHERE collection_id = $1 AND project_id = $2")
            .bind(collection_id)
            .bind(project_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// List the live projects inside a collection, most recently added first.
pub async fn list_items(
    pool: &PgPool,
    collection_id: Uuid,
) -> Result<Vec<ProjectWithRefs>, sqlx::Error> {
    sqlx::query_as::<_, ProjectWithRefs>(
        r#"
        SELECT p.id, p.user_id, p.category_id, p.title, p.content_text,
               p.rendering_type, p.custom_data, p.thumbnail_url, p.view_count,
               p.created_at, p.updated_at,
               u.nickname AS owner_nickname,
               u.profile_image_url AS owner_profile_image_url,
               c.name AS category_name
        FROM collection_items ci
        JOIN projects p ON p.id = ci.project_id AND p.is_deleted = FALSE
        JOIN users u ON u.id = p.user_id
        JOIN categories c ON c.id = p.category_id
        WHERE ci.collection_id = $1
        ORDER BY ci.added_at DESC
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await
}

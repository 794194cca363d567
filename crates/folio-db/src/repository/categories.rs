//! Categories repository.

use folio_common::models::category::Category;
use sqlx::PgPool;

/// List all categories, parents before children.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories ORDER BY parent_id NULLS FIRST, name ASC",
    )
    .fetch_all(pool)
    .await
}

/// Find a category by ID.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

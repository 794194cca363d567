//! Collection model — user-curated groupings of bookmarked projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A collection row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A project membership row within a collection.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectionItem {
    pub collection_id: Uuid,
    pub project_id: i64,
    pub added_at: DateTime<Utc>,
}

/// Create collection request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    #[validate(length(min = 1, max = 60, message = "Collection name must be 1-60 characters"))]
    pub name: String,

    #[validate(length(max = 300))]
    pub description: Option<String>,
}

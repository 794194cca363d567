//! Category model — the browse taxonomy. Seeded by migration, managed by admins.

use serde::{Deserialize, Serialize};

/// A category row. `parent_id` allows one level of nesting in practice.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

/// Compact category representation embedded in project responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
}

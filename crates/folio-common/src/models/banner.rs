//! Promotional surfaces — banners and popups, managed from the admin dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A banner row. Banners belong to a page ("discover", "connect", ...) and
/// render in `display_order`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Banner {
    pub id: i64,
    pub page_type: String,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create banner request (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(length(min = 1, max = 32))]
    pub page_type: String,

    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(url(message = "Invalid banner image URL"))]
    pub image_url: String,

    #[validate(url)]
    pub link_url: Option<String>,

    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update banner request (admin) — absent fields keep their current values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBannerRequest {
    #[validate(length(min = 1, max = 32))]
    pub page_type: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(url)]
    pub link_url: Option<String>,

    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A popup row. Shown site-wide while active and inside its date window.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Popup {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create popup request (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePopupRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(url(message = "Invalid popup image URL"))]
    pub image_url: String,

    #[validate(url)]
    pub link_url: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Update popup request (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePopupRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(url)]
    pub link_url: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

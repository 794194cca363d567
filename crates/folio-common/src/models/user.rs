//! User model — the identity layer.
//!
//! Accounts are email + password. The nickname is what other users see;
//! it defaults to the email local part at registration time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A Folio user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v7 — time-sortable)
    pub id: Uuid,

    /// Login identity (unique, case-insensitive)
    #[serde(skip_serializing)]
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Public display name
    pub nickname: String,

    /// Short bio / about me
    pub bio: Option<String>,

    /// Avatar image URL (object storage)
    pub profile_image_url: Option<String>,

    /// Profile cover image URL
    pub cover_image_url: Option<String>,

    /// Role — drives access to the admin surface
    pub role: UserRole,

    /// Cleared by moderation to lock the account out
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User roles. Stored as plain text in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Optional — defaults to the email local part
    #[validate(length(min = 1, max = 32, message = "Nickname must be 1-32 characters"))]
    pub nickname: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Safe user representation for API responses (no sensitive fields).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nickname: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            nickname: u.nickname,
            bio: u.bio,
            profile_image_url: u.profile_image_url,
            cover_image_url: u.cover_image_url,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// Compact author/owner representation embedded in project and comment responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub nickname: String,
    pub profile_image_url: Option<String>,
}

/// Update profile request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 32))]
    pub nickname: Option<String>,

    #[validate(length(max = 300))]
    pub bio: Option<String>,

    #[validate(url(message = "Invalid profile image URL"))]
    pub profile_image_url: Option<String>,

    #[validate(url(message = "Invalid cover image URL"))]
    pub cover_image_url: Option<String>,
}

/// Derive the default nickname from an email address.
pub fn default_nickname(email: &str) -> String {
    email.split('@').next().unwrap_or("creator").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_nickname_uses_local_part() {
        assert_eq!(default_nickname("jeongmin@example.com"), "jeongmin");
    }

    #[test]
    fn user_response_hides_credentials() {
        let user = User {
            id: Uuid::now_v7(),
            email: "a@b.c".into(),
            password_hash: "secret".into(),
            nickname: "a".into(),
            bio: None,
            profile_image_url: None,
            cover_image_url: None,
            role: UserRole::User,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("password_hash").is_none());
    }
}

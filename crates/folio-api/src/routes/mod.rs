//! API route modules.

pub mod admin;
pub mod auth;
pub mod banners;
pub mod categories;
pub mod collections;
pub mod comments;
pub mod health;
pub mod messages;
pub mod projects;
pub mod uploads;
pub mod users;

//! Repository layer — query functions organized by domain.

pub mod banners;
pub mod bookmarks;
pub mod categories;
pub mod collections;
pub mod comments;
pub mod follows;
pub mod likes;
pub mod messages;
pub mod popups;
pub mod projects;
pub mod users;

//! Core domain models shared across all Folio services.
//!
//! These are the "truth" types — what the database stores and the API serializes.
//! Users and collections use UUID v7 keys; projects, comments, banners, and
//! popups use integer serial keys.

pub mod banner;
pub mod category;
pub mod collection;
pub mod comment;
pub mod message;
pub mod project;
pub mod user;

/// Re-export all model types for convenience.
pub use banner::*;
pub use category::*;
pub use collection::*;
pub use comment::*;
pub use message::*;
pub use project::*;
pub use user::*;

//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod users;

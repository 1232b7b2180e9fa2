//! Model to entity mappers
//!
//! This module provides conversions from database models to the domain entities
//! in social-core. Writes bind entity fields directly in the repositories.

mod comment;
mod message;
mod notification;
mod post;
mod user;

pub use notification::parse_notification_kind;

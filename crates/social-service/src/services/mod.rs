//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod effects;
pub mod error;
pub mod follow;
pub mod like;
mod lookup;
pub mod messaging;
pub mod notification;
pub mod post;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use effects::{NotificationSubject, SecondaryEffects};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use like::LikeService;
pub use messaging::MessagingService;
pub use notification::NotificationService;
pub use post::PostService;
pub use user::UserService;

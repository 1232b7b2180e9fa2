//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod follow;
mod like;
mod message;
mod notification;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;

//! # social-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    aggregate_threads, Attachment, Comment, CommentPreview, CommentStats, ExploreSort, Follow,
    Message, Notification, NotificationDetails, Post, PostPreview, PostStats, ProfileStats,
    ReadReceipt, Thread, User, UserPreview, MAX_ATTACHMENTS, MAX_COMMENT_LENGTH,
    MAX_MESSAGE_LENGTH,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    CommentRepository, EventPublisher, FollowRepository, LikeRepository, MessageRepository,
    NoopEventPublisher, NotificationRepository, Page, PostRepository, RepoResult, UserRepository,
};
pub use value_objects::{NotificationKind, Snowflake, SnowflakeGenerator, SnowflakeParseError};

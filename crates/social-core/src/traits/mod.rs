//! Ports implemented by the infrastructure crates

mod publisher;
mod repositories;

pub use publisher::{EventPublisher, NoopEventPublisher};
pub use repositories::{
    CommentRepository, FollowRepository, LikeRepository, MessageRepository, NotificationRepository,
    Page, PostRepository, RepoResult, UserRepository,
};

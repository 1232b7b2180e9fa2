//! Domain entities - core business objects

mod comment;
mod follow;
mod message;
mod notification;
mod post;
mod thread;
mod user;

pub use comment::{Comment, CommentStats, MAX_COMMENT_LENGTH};
pub use follow::{Follow, ProfileStats};
pub use message::{Attachment, Message, ReadReceipt, MAX_ATTACHMENTS, MAX_MESSAGE_LENGTH};
pub use notification::{CommentPreview, Notification, NotificationDetails, PostPreview, UserPreview};
pub use post::{ExploreSort, Post, PostStats};
pub use thread::{aggregate_threads, Thread};
pub use user::User;

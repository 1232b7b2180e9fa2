//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod message;
mod notification;
mod post;
mod user;

pub use comment::{CommentModel, CommentStatsModel};
pub use message::MessageModel;
pub use notification::{NotificationDetailsModel, NotificationModel};
pub use post::{PostModel, PostStatsModel};
pub use user::{ProfileStatsModel, UserModel};

//! Notification database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    pub from_user_id: i64,
    pub kind: String,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification row left-joined with its actor, post (and post author) and comment
#[derive(Debug, Clone, FromRow)]
pub struct NotificationDetailsModel {
    #[sqlx(flatten)]
    pub notification: NotificationModel,
    pub from_username: Option<String>,
    pub from_avatar: Option<String>,
    pub post_image: Option<String>,
    pub post_author_id: Option<i64>,
    pub post_author_username: Option<String>,
    pub post_author_avatar: Option<String>,
    pub comment_text: Option<String>,
    pub comment_post_id: Option<i64>,
}

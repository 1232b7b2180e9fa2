//! Notification entity - an entry in a user's notification log

use chrono::{DateTime, Utc};

use crate::value_objects::{NotificationKind, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    /// Recipient
    pub user_id: Snowflake,
    /// Actor
    pub from_user_id: Snowflake,
    pub kind: NotificationKind,
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a notification, or `None` when the actor is the recipient.
    ///
    /// Nobody is notified about their own activity.
    pub fn for_recipient(
        id: Snowflake,
        user_id: Snowflake,
        from_user_id: Snowflake,
        kind: NotificationKind,
    ) -> Option<Self> {
        (user_id != from_user_id).then(|| Self {
            id,
            user_id,
            from_user_id,
            kind,
            post_id: None,
            comment_id: None,
            is_read: false,
            created_at: Utc::now(),
        })
    }

    pub fn with_post(mut self, post_id: Snowflake) -> Self {
        self.post_id = Some(post_id);
        self
    }

    pub fn with_comment(mut self, comment_id: Snowflake) -> Self {
        self.comment_id = Some(comment_id);
        self
    }
}

/// Public slice of a user profile carried inside notification listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreview {
    pub id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPreview {
    pub id: Snowflake,
    pub image: Option<String>,
    pub author: UserPreview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPreview {
    pub id: Snowflake,
    pub text: String,
    pub post_id: Snowflake,
}

/// A notification joined with the actor and a preview of its subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDetails {
    pub notification: Notification,
    pub from_user: Option<UserPreview>,
    pub post: Option<PostPreview>,
    pub comment: Option<CommentPreview>,
}

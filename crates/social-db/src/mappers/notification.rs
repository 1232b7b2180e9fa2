//! Notification model -> entity mapper

use social_core::{
    CommentPreview, Notification, NotificationDetails, NotificationKind, PostPreview, Snowflake,
    UserPreview,
};

use crate::models::{NotificationDetailsModel, NotificationModel};

/// Convert the `kind` column to NotificationKind. The column carries a CHECK
/// constraint, so the fallback only covers rows written outside this service.
pub fn parse_notification_kind(kind: &str) -> NotificationKind {
    kind.parse().unwrap_or_else(|_| {
        tracing::warn!(kind, "Unknown notification kind in database");
        NotificationKind::Like
    })
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            from_user_id: Snowflake::new(model.from_user_id),
            kind: parse_notification_kind(&model.kind),
            post_id: model.post_id.map(Snowflake::new),
            comment_id: model.comment_id.map(Snowflake::new),
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

impl From<NotificationDetailsModel> for NotificationDetails {
    fn from(model: NotificationDetailsModel) -> Self {
        let notification = Notification::from(model.notification);

        let from_user = model.from_username.map(|username| UserPreview {
            id: notification.from_user_id,
            username,
            avatar: model.from_avatar,
        });

        let post = match (notification.post_id, model.post_author_id, model.post_author_username) {
            (Some(id), Some(author_id), Some(username)) => Some(PostPreview {
                id,
                image: model.post_image,
                author: UserPreview {
                    id: Snowflake::new(author_id),
                    username,
                    avatar: model.post_author_avatar,
                },
            }),
            _ => None,
        };

        let comment = match (notification.comment_id, model.comment_text, model.comment_post_id) {
            (Some(id), Some(text), Some(post_id)) => Some(CommentPreview {
                id,
                text,
                post_id: Snowflake::new(post_id),
            }),
            _ => None,
        };

        NotificationDetails {
            notification,
            from_user,
            post,
            comment,
        }
    }
}

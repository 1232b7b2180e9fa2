//! Comment model -> entity mapper

use social_core::{Comment, CommentStats, Snowflake};

use crate::models::{CommentModel, CommentStatsModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            text: model.text,
            created_at: model.created_at,
        }
    }
}

impl From<CommentStatsModel> for CommentStats {
    fn from(model: CommentStatsModel) -> Self {
        CommentStats {
            comment: model.comment.into(),
            likes_count: model.likes_count,
            liked: model.liked,
        }
    }
}

//! Post model -> entity mapper

use social_core::{Post, PostStats, Snowflake};

use crate::models::{PostModel, PostStatsModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            description: model.description,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PostStatsModel> for PostStats {
    fn from(model: PostStatsModel) -> Self {
        PostStats {
            post: model.post.into(),
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            liked: model.liked,
        }
    }
}

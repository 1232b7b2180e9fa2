//! User model -> entity mapper

use social_core::{ProfileStats, Snowflake, User};

use crate::models::{ProfileStatsModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            full_name: model.full_name,
            avatar: model.avatar,
            bio: model.bio,
            website: model.website,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProfileStatsModel> for ProfileStats {
    fn from(model: ProfileStatsModel) -> Self {
        ProfileStats {
            posts: model.posts,
            followers: model.followers,
            following: model.following,
        }
    }
}

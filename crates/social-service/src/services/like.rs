//! Like service
//!
//! Post likes: toggle, status and likers.

use social_core::{NotificationKind, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{LikeStatusResponse, PublicUserResponse};

use super::context::ServiceContext;
use super::effects::NotificationSubject;
use super::error::ServiceResult;
use super::lookup::require_post;

/// Default number of likers returned
pub const DEFAULT_LIKERS_LIMIT: i64 = 50;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the caller's like on a post.
    ///
    /// A create that loses a race against a concurrent duplicate still reports
    /// `liked: true`. Only a newly inserted like notifies the author.
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<LikeStatusResponse> {
        let post = require_post(self.ctx, post_id).await?;
        let likes = self.ctx.like_repo();

        let liked = if likes.exists(post_id, user_id).await? {
            likes.delete(post_id, user_id).await?;
            info!(user_id = %user_id, post_id = %post_id, "Post unliked");
            false
        } else {
            if likes.create(post_id, user_id).await? {
                info!(user_id = %user_id, post_id = %post_id, "Post liked");
                self.ctx.effects().notify(
                    post.author_id,
                    user_id,
                    NotificationKind::Like,
                    NotificationSubject::post(post_id),
                );
            } else {
                debug!(user_id = %user_id, post_id = %post_id, "Concurrent like already recorded");
            }
            true
        };

        let count = likes.count(post_id).await?;
        Ok(LikeStatusResponse { liked, count })
    }

    /// Whether the caller likes the post, and how many likes it has
    #[instrument(skip(self))]
    pub async fn like_info(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<LikeStatusResponse> {
        require_post(self.ctx, post_id).await?;
        let likes = self.ctx.like_repo();

        Ok(LikeStatusResponse {
            liked: likes.exists(post_id, user_id).await?,
            count: likes.count(post_id).await?,
        })
    }

    /// Users who liked the post, newest first
    #[instrument(skip(self))]
    pub async fn likers(
        &self,
        post_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        require_post(self.ctx, post_id).await?;
        let users = self.ctx.like_repo().likers(post_id, limit).await?;
        Ok(users.iter().map(PublicUserResponse::from).collect())
    }
}

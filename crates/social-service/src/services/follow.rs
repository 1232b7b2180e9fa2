//! Follow service
//!
//! Directed follow edges between users.

use social_core::{DomainError, Follow, NotificationKind, Page, Snowflake};
use tracing::{info, instrument};

use crate::dto::{FollowStatusResponse, PublicUserResponse};

use super::context::ServiceContext;
use super::effects::NotificationSubject;
use super::error::ServiceResult;
use super::lookup::require_user;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start following `target_id`
    ///
    /// # Errors
    /// `SelfFollow` for oneself, `UserNotFound` for an unknown target and
    /// `AlreadyFollowing` when the edge exists.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        let follow = Follow::new(follower_id, target_id)?;
        require_user(self.ctx, target_id).await?;

        if !self.ctx.follow_repo().create(&follow).await? {
            return Err(DomainError::AlreadyFollowing.into());
        }

        info!(user_id = %follower_id, target_id = %target_id, "User followed");

        self.ctx.effects().notify(
            target_id,
            follower_id,
            NotificationKind::Follow,
            NotificationSubject::default(),
        );

        Ok(())
    }

    /// Stop following `target_id`. Absence of the edge is not an error.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.follow_repo().delete(follower_id, target_id).await? {
            info!(user_id = %follower_id, target_id = %target_id, "User unfollowed");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn is_following(
        &self,
        follower_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<FollowStatusResponse> {
        Ok(FollowStatusResponse {
            is_following: self.ctx.follow_repo().exists(follower_id, target_id).await?,
        })
    }

    /// Users following `user_id`, newest edge first
    #[instrument(skip(self))]
    pub async fn followers(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        require_user(self.ctx, user_id).await?;
        let users = self.ctx.follow_repo().followers(user_id, page).await?;
        Ok(users.iter().map(PublicUserResponse::from).collect())
    }

    /// Users that `user_id` follows, newest edge first
    #[instrument(skip(self))]
    pub async fn following(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        require_user(self.ctx, user_id).await?;
        let users = self.ctx.follow_repo().following(user_id, page).await?;
        Ok(users.iter().map(PublicUserResponse::from).collect())
    }
}

//! User service
//!
//! Handles user profile operations, profile summaries and search.

use social_core::{Page, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    CurrentUserResponse, ProfilePostResponse, ProfileStatsResponse, ProfileSummaryResponse,
    ProfileUserResponse, PublicUserResponse, SearchUsersQuery, UpdateUserRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lookup::require_user;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Upper bound on posts returned in a profile grid
pub const PROFILE_POSTS_LIMIT: i64 = 1000;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = require_user(self.ctx, user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = require_user(self.ctx, user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Update current user
    #[instrument(skip(self, request))]
    pub async fn update_current_user(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = require_user(self.ctx, user_id).await?;
        let mut changed = false;

        if let Some(username) = request.username {
            if username != user.username {
                user.set_username(username);
                changed = true;
            }
        }
        if let Some(full_name) = request.full_name {
            user.set_full_name(full_name.trim().to_string());
            changed = true;
        }
        if let Some(bio) = request.bio {
            user.set_bio(Some(bio.trim().to_string()));
            changed = true;
        }
        if let Some(website) = request.website {
            user.set_website(Some(website.trim().to_string()));
            changed = true;
        }
        if let Some(avatar) = request.avatar {
            user.set_avatar(Some(avatar));
            changed = true;
        }

        if changed {
            // UsernameTaken surfaces as a 409
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        Ok(CurrentUserResponse::from(&user))
    }

    /// Case-insensitive substring search over username and full name
    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchUsersQuery) -> ServiceResult<Vec<PublicUserResponse>> {
        let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let users = self
            .ctx
            .user_repo()
            .search(query.q.trim(), limit)
            .await?;

        Ok(users.iter().map(PublicUserResponse::from).collect())
    }

    /// Profile page data for `key`, which is `me`, a user id or a username
    #[instrument(skip(self))]
    pub async fn profile_summary(
        &self,
        viewer: Snowflake,
        key: &str,
    ) -> ServiceResult<ProfileSummaryResponse> {
        let is_self_key = key == "me";
        let user = self.resolve_profile(viewer, key).await?;

        let stats = self.ctx.user_repo().profile_stats(user.id).await?;
        let posts = self
            .ctx
            .post_repo()
            .list_by_author(user.id, Page::first(PROFILE_POSTS_LIMIT), None)
            .await?;

        let is_following = if is_self_key {
            None
        } else {
            Some(self.ctx.follow_repo().exists(viewer, user.id).await?)
        };

        Ok(ProfileSummaryResponse {
            user: ProfileUserResponse::from(&user),
            stats: ProfileStatsResponse::from(stats),
            posts: posts.into_iter().map(ProfilePostResponse::from).collect(),
            is_following,
        })
    }

    async fn resolve_profile(&self, viewer: Snowflake, key: &str) -> ServiceResult<User> {
        if key == "me" {
            return require_user(self.ctx, viewer).await;
        }

        // Numeric handles are allowed, so an id miss falls through to a username lookup
        if let Ok(id) = Snowflake::parse(key) {
            if let Some(user) = self.ctx.user_repo().find_by_id(id).await? {
                return Ok(user);
            }
        }

        self.ctx
            .user_repo()
            .find_by_username(key)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", key))
    }
}

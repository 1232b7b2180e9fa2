//! Shared loaders used by several services

use std::collections::HashMap;

use social_core::{DomainError, Post, Snowflake, User};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Load a user or fail with `UserNotFound`
pub(crate) async fn require_user(ctx: &ServiceContext, id: Snowflake) -> ServiceResult<User> {
    ctx.user_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(id).into())
}

/// Load a post or fail with `PostNotFound`
pub(crate) async fn require_post(ctx: &ServiceContext, id: Snowflake) -> ServiceResult<Post> {
    ctx.post_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::PostNotFound(id).into())
}

/// Batch-load profiles keyed by id. Unknown ids are absent from the map.
pub(crate) async fn users_by_id<I>(
    ctx: &ServiceContext,
    ids: I,
) -> ServiceResult<HashMap<Snowflake, User>>
where
    I: IntoIterator<Item = Snowflake>,
{
    let mut ids: Vec<Snowflake> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = ctx.user_repo().find_by_ids(&ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

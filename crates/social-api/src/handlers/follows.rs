//! Follow handlers

use axum::{extract::State, Json};
use social_core::{DomainError, Snowflake};
use social_service::dto::{FollowRequest, FollowStatusResponse, OkResponse, PublicUserResponse};
use social_service::FollowService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Follow the user named in the body
///
/// POST /follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<FollowRequest>,
) -> ApiResult<Created<Json<OkResponse>>> {
    let target_id = Snowflake::parse(&request.user_id)
        .map_err(|_| DomainError::InvalidId(request.user_id.clone()))?;

    let service = FollowService::new(state.service_context());
    service.follow(auth.user_id, target_id).await?;
    Ok(Created(Json(OkResponse::ok())))
}

/// DELETE /follow/{user_id}
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(target_id): IdPath,
) -> ApiResult<NoContent> {
    let service = FollowService::new(state.service_context());
    service.unfollow(auth.user_id, target_id).await?;
    Ok(NoContent)
}

/// GET /follow/is-following/{user_id}
pub async fn is_following(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(target_id): IdPath,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let status = service.is_following(auth.user_id, target_id).await?;
    Ok(Json(status))
}

/// GET /follow/followers/{user_id}
pub async fn followers(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = FollowService::new(state.service_context());
    let users = service.followers(user_id, pagination.page()).await?;
    Ok(Json(users))
}

/// GET /follow/following/{user_id}
pub async fn following(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = FollowService::new(state.service_context());
    let users = service.following(user_id, pagination.page()).await?;
    Ok(Json(users))
}

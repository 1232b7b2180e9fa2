//! Like handlers

use axum::{extract::State, Json};
use social_service::dto::{LikeStatusResponse, PublicUserResponse};
use social_service::LikeService;

use crate::extractors::{AuthUser, IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like the post, or remove the caller's like if present
///
/// POST /posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = LikeService::new(state.service_context());
    let status = service.toggle_like(auth.user_id, post_id).await?;
    Ok(Json(status))
}

/// GET /posts/{post_id}/like
pub async fn get_like_info(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = LikeService::new(state.service_context());
    let status = service.like_info(auth.user_id, post_id).await?;
    Ok(Json(status))
}

/// Users who liked the post; only `limit` is honored
///
/// GET /posts/{post_id}/likes
pub async fn get_likers(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = LikeService::new(state.service_context());
    let users = service.likers(post_id, pagination.limit).await?;
    Ok(Json(users))
}

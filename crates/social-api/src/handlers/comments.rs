//! Comment handlers
//!
//! Comments on posts and likes on comments.

use axum::{extract::State, Json};
use social_service::dto::{CommentResponse, CreateCommentRequest, LikeStatusResponse};
use social_service::CommentService;

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Comments on a post, newest first
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service
        .list_comments(post_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(comments))
}

/// POST /posts/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.add_comment(auth.user_id, post_id, request).await?;
    Ok(Created(Json(comment)))
}

/// PUT /comments/{comment_id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = CommentService::new(state.service_context());
    let status = service.like_comment(auth.user_id, comment_id).await?;
    Ok(Json(status))
}

/// DELETE /comments/{comment_id}/like
pub async fn unlike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = CommentService::new(state.service_context());
    let status = service.unlike_comment(auth.user_id, comment_id).await?;
    Ok(Json(status))
}

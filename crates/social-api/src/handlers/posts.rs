//! Post handlers
//!
//! Feed, single-post CRUD and the explore listing.

use axum::{extract::State, Json};
use social_service::dto::{CreatePostRequest, ExploreQuery, PostResponse, UpdatePostRequest};
use social_service::PostService;

use crate::extractors::{
    AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// All posts, newest first
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.list_posts(pagination.page(), viewer.user_id()).await?;
    Ok(Json(posts))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(post)))
}

/// Get a single post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(post_id, viewer.user_id()).await?;
    Ok(Json(post))
}

/// Edit a post (author only)
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.update_post(auth.user_id, post_id, request).await?;
    Ok(Json(post))
}

/// Delete a post (author only)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(auth.user_id, post_id).await?;
    Ok(NoContent)
}

/// GET /explore?sort=&page=&limit=
pub async fn explore(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ExploreQuery>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.explore(query).await?;
    Ok(Json(posts))
}

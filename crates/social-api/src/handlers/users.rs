//! User handlers
//!
//! Account management, user lookup and search, and profile pages.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{
    CurrentUserResponse, PostResponse, ProfileSummaryResponse, PublicUserResponse,
    SearchUsersQuery, UpdateUserRequest, UserResponse,
};
use social_service::{PostService, UserService};

use crate::extractors::{
    AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson, ValidatedQuery,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Search users by username or display name
///
/// GET /users/search?q=&limit=
pub async fn search_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchUsersQuery>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.search(query).await?;
    Ok(Json(users))
}

/// Get user by ID
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// A user's posts, newest first
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service
        .list_user_posts(user_id, pagination.page(), viewer.user_id())
        .await?;
    Ok(Json(posts))
}

/// Profile page: user, stats, post grid and follow state
///
/// GET /profiles/{id_or_username}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> ApiResult<Json<ProfileSummaryResponse>> {
    let service = UserService::new(state.service_context());
    let summary = service.profile_summary(auth.user_id, &key).await?;
    Ok(Json(summary))
}

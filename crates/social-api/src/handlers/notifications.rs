//! Notification handlers
//!
//! The caller's notification log. Every route is scoped to the caller.

use axum::{extract::State, Json};
use social_service::dto::{
    MarkAllReadResponse, NotificationResponse, OkResponse, UnreadCountResponse,
};
use social_service::NotificationService;

use crate::extractors::{AuthUser, IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let items = service.list(auth.user_id, pagination.page()).await?;
    Ok(Json(items))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread_count(auth.user_id).await?))
}

/// PATCH /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<Json<OkResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_read(auth.user_id, notification_id).await?))
}

/// PATCH /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(auth.user_id).await?))
}

//! Direct message handlers
//!
//! Threads are derived from messages; there is no thread resource to create.

use axum::{extract::State, Json};
use social_service::dto::{
    ConversationResponse, ReadReceiptResponse, SendMessageRequest, SendMessageResponse,
    ThreadResponse,
};
use social_service::MessagingService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// One row per conversation partner, latest activity first
///
/// GET /messages/threads
pub async fn list_threads(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ThreadResponse>>> {
    let service = MessagingService::new(state.service_context());
    let threads = service.list_threads(auth.user_id).await?;
    Ok(Json(threads))
}

/// Full conversation with one peer, oldest first
///
/// GET /messages/thread/{peer_id}
pub async fn get_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(peer_id): IdPath,
) -> ApiResult<Json<ConversationResponse>> {
    let service = MessagingService::new(state.service_context());
    let conversation = service.get_thread(auth.user_id, peer_id).await?;
    Ok(Json(conversation))
}

/// Send a message
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<SendMessageResponse>>> {
    let service = MessagingService::new(state.service_context());
    let sent = service.send_message(auth.user_id, request).await?;
    Ok(Created(Json(sent)))
}

/// PATCH /messages/thread/{peer_id}/read
pub async fn mark_thread_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(peer_id): IdPath,
) -> ApiResult<Json<ReadReceiptResponse>> {
    let service = MessagingService::new(state.service_context());
    let receipt = service.mark_thread_read(auth.user_id, peer_id).await?;
    Ok(Json(receipt))
}

/// PATCH /messages/read/{message_id}
pub async fn mark_message_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(message_id): IdPath,
) -> ApiResult<Json<ReadReceiptResponse>> {
    let service = MessagingService::new(state.service_context());
    let receipt = service.mark_message_read(auth.user_id, message_id).await?;
    Ok(Json(receipt))
}

//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_common::TokenPair;

// ============================================================================
// Common Response Types
// ============================================================================

/// `{ok: true}`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: CurrentUserResponse) -> Self {
        Self { tokens, user }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile embedded in posts, comments, messages and user lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
}

/// Public user response returned by `GET /users/:id`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity block of a profile summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileStatsResponse {
    pub posts: i64,
    pub followers: i64,
    pub following: i64,
}

/// Grid tile on a profile page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePostResponse {
    pub id: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /profiles/:id_or_username`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub user: ProfileUserResponse,
    pub stats: ProfileStatsResponse,
    pub posts: Vec<ProfilePostResponse>,
    /// Omitted when viewing one's own profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post view with counts. `liked` is only present for authenticated callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author: PublicUserResponse,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

/// Like state of a post or comment for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeStatusResponse {
    pub liked: bool,
    pub count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user: PublicUserResponse,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub liked: bool,
}

// ============================================================================
// Follow Responses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Actor or post author preview inside a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreviewResponse {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPostResponse {
    pub id: String,
    pub image: Option<String>,
    pub author: UserPreviewResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCommentResponse {
    pub id: String,
    pub text: String,
    pub post_id: String,
}

/// One entry of the notification log. Also the `NOTIFICATION_CREATE` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub from_user: Option<UserPreviewResponse>,
    pub post: Option<NotificationPostResponse>,
    pub comment: Option<NotificationCommentResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkAllReadResponse {
    pub ok: bool,
    pub modified: u64,
}

// ============================================================================
// Message Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentResponse {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A message with both participants' public profiles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender: PublicUserResponse,
    pub peer: PublicUserResponse,
    pub text: String,
    pub attachments: Vec<AttachmentResponse>,
    pub read_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A message with participant ids only, as carried in thread listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessageResponse {
    pub id: String,
    pub sender_id: String,
    pub peer_id: String,
    pub text: String,
    pub attachments: Vec<AttachmentResponse>,
    pub read_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of `GET /messages/threads`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub peer: PublicUserResponse,
    pub last_message: ThreadMessageResponse,
    pub unread_count: i64,
}

/// `GET /messages/thread/:peer_id`
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub peer: PublicUserResponse,
    pub messages: Vec<MessageResponse>,
}

/// `POST /messages`
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
}

/// Outcome of a message mark-read call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadReceiptResponse {
    pub ok: bool,
    pub matched: u64,
    pub modified: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

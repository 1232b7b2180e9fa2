//! Test fixtures and data generators
//!
//! Request bodies the tests send and the response shapes they read back.
//! Only the fields the tests inspect are declared.

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

/// Short random suffix so repeated runs against one database do not collide
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..10].to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique(prefix: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{prefix}{suffix}@example.com"),
            full_name: format!("Test {prefix}"),
            username: format!("{prefix}_{suffix}"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Registered account with live tokens
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub registration: RegisterRequest,
}

impl TestUser {
    /// Register a fresh account
    pub async fn register(server: &TestServer, prefix: &str) -> Result<Self> {
        let registration = RegisterRequest::unique(prefix);
        let response = server.post("/auth/register", None, &registration).await?;
        let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await?;

        Ok(Self {
            id: auth.user.id,
            username: auth.user.username,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            registration,
        })
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub description: String,
    pub image: Option<String>,
}

impl CreatePostRequest {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            image: Some("https://cdn.example.com/p.jpg".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author: UserResponse,
    pub description: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked: Option<bool>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LikeStatusResponse {
    pub liked: bool,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub text: String,
    pub likes_count: i64,
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub user: UserResponse,
    pub stats: ProfileStats,
    pub posts: Vec<serde_json::Value>,
    pub is_following: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileStats {
    pub posts: i64,
    pub followers: i64,
    pub following: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub from_user: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MarkAllReadResponse {
    pub ok: bool,
    pub modified: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub peer_id: String,
    pub text: String,
    pub attachments: Vec<serde_json::Value>,
}

impl SendMessageRequest {
    pub fn text(peer_id: &str, text: &str) -> Self {
        Self {
            peer_id: peer_id.to_string(),
            text: text.to_string(),
            attachments: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender: UserResponse,
    pub peer: UserResponse,
    pub text: String,
    pub read_by: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub peer: UserResponse,
    pub last_message: ThreadMessageResponse,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessageResponse {
    pub id: String,
    pub sender_id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub peer: UserResponse,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ReadReceiptResponse {
    pub ok: bool,
    pub matched: u64,
    pub modified: u64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

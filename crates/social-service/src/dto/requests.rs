//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};


/// Usernames: 3-32 characters of ASCII letters, digits, `_` and `.`
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(ValidationError::new("username_length")
            .with_message("Username must be 3-32 characters".into()));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::new("username_charset").with_message(
            "Username may only contain letters, digits, underscores and dots".into(),
        ));
    }
    Ok(())
}

fn trimmed_len_within(
    value: &str,
    max: usize,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 || len > max {
        return Err(ValidationError::new(code).with_message(message.into()));
    }
    Ok(())
}

/// Comment text: 1-1000 characters once trimmed
pub fn validate_comment_text(text: &str) -> Result<(), ValidationError> {
    trimmed_len_within(text, 1000, "comment_length", "Comment must be 1-1000 characters")
}

/// Attachment URLs: 1-2048 characters once trimmed
pub fn validate_attachment_url(url: &str) -> Result<(), ValidationError> {
    trimmed_len_within(url, 2048, "url_length", "Attachment URL must be 1-2048 characters")
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "Full name must be 1-64 characters"))]
    pub full_name: String,

    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request. Absent fields are left unchanged; an empty
/// string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Full name must be 1-64 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 150, message = "Bio must be at most 150 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 2048, message = "Website must be at most 2048 characters"))]
    pub website: Option<String>,

    /// Avatar URL
    #[validate(length(max = 2048, message = "Avatar URL must be at most 2048 characters"))]
    pub avatar: Option<String>,
}

/// `GET /users/search` query
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchUsersQuery {
    #[serde(default)]
    pub q: String,

    #[validate(range(min = 1, max = 50, message = "limit must be 1-50"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Post Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2200, message = "Description must be 1-2200 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 2048, message = "Image URL must be 1-2048 characters"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 2200, message = "Description must be 1-2200 characters"))]
    pub description: Option<String>,

    /// Empty string removes the image
    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image: Option<String>,
}

/// `GET /explore` query
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExploreQuery {
    /// `trending` (default), `new` or `random`
    pub sort: Option<String>,

    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 50, message = "limit must be 1-50"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom(function = "validate_comment_text"))]
    pub text: String,
}

// ============================================================================
// Follow Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
}

// ============================================================================
// Message Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachmentRequest {
    #[validate(custom(function = "validate_attachment_url"))]
    pub url: String,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Send a direct message. Text may be empty only when attachments are present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "peerId is required"))]
    pub peer_id: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub text: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 attachments are allowed"), nested)]
    pub attachments: Vec<AttachmentRequest>,
}

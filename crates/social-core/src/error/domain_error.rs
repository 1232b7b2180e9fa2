//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("You cannot message yourself")]
    SelfMessage,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the author can modify this post")]
    NotPostOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Already following")]
    AlreadyFollowing,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::SelfMessage => "SELF_MESSAGE",

            // Authorization
            Self::NotPostOwner => "NOT_POST_OWNER",

            // Conflict
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::MessageNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidId(_)
                | Self::ContentTooLong { .. }
                | Self::SelfFollow
                | Self::SelfMessage
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UserAlreadyExists | Self::UsernameTaken | Self::AlreadyFollowing
        )
    }
}

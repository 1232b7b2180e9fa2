//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    validate_username, AttachmentRequest, CreateCommentRequest, CreatePostRequest, ExploreQuery,
    FollowRequest, LoginRequest, RefreshTokenRequest, RegisterRequest, SearchUsersQuery,
    SendMessageRequest, UpdatePostRequest, UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    AttachmentResponse, AuthResponse, CommentResponse, ConversationResponse, CurrentUserResponse,
    FollowStatusResponse, HealthChecks, HealthResponse, LikeStatusResponse, MarkAllReadResponse,
    MessageResponse, NotificationCommentResponse, NotificationPostResponse, NotificationResponse,
    OkResponse, PostResponse, ProfilePostResponse, ProfileStatsResponse, ProfileSummaryResponse,
    ProfileUserResponse, PublicUserResponse, ReadReceiptResponse, ReadinessResponse,
    SendMessageResponse, ThreadMessageResponse, ThreadResponse, UnreadCountResponse,
    UserPreviewResponse, UserResponse,
};

// Re-export mappers and helper structs
pub use mappers::{CommentWithAuthor, MessageWithParticipants, PostWithAuthor, ThreadWithPeer};

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Comment, CommentStats, ExploreSort, Follow, Message, Notification, NotificationDetails, Post,
    PostStats, ProfileStats, ReadReceipt, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Keyset page: up to `limit` rows strictly older than `before`, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub before: Option<Snowflake>,
}

impl Page {
    pub const fn new(limit: i64, before: Option<Snowflake>) -> Self {
        Self { limit, before }
    }

    pub const fn first(limit: i64) -> Self {
        Self { limit, before: None }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Fetch several users at once. Missing ids are skipped; order is unspecified.
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Case-insensitive email lookup
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Case-insensitive username lookup
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check whether either the email or the username is taken
    async fn exists_by_email_or_username(&self, email: &str, username: &str) -> RepoResult<bool>;

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Substring search over username and full name, ordered by username
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Post, follower and following counts for one user
    async fn profile_stats(&self, id: Snowflake) -> RepoResult<ProfileStats>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Load a post with its counts; `liked` is filled in when `viewer` is set
    async fn find_with_stats(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<PostStats>>;

    /// All posts, newest first
    async fn list(&self, page: Page, viewer: Option<Snowflake>) -> RepoResult<Vec<PostStats>>;

    /// One author's posts, newest first
    async fn list_by_author(
        &self,
        author_id: Snowflake,
        page: Page,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Vec<PostStats>>;

    /// Offset-paged discovery listing. `Random` ignores `offset`.
    async fn explore(&self, sort: ExploreSort, offset: i64, limit: i64) -> RepoResult<Vec<PostStats>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post together with its likes, comments and notifications
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Insert the like if absent. Returns `true` only when a row was created.
    async fn create(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Remove the like if present. Returns `true` only when a row was removed.
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    async fn exists(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    async fn count(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Users who liked the post, most recent like first
    async fn likers(&self, post_id: Snowflake, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Comments on a post, newest first, with like counts for `viewer`
    async fn list_for_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
        page: Page,
    ) -> RepoResult<Vec<CommentStats>>;

    async fn count_for_post(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Returns `true` only when a like row was created
    async fn add_like(&self, comment_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Returns `true` only when a like row was removed
    async fn remove_like(&self, comment_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    async fn count_likes(&self, comment_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert the edge if absent. Returns `false` when it already existed.
    async fn create(&self, follow: &Follow) -> RepoResult<bool>;

    /// Returns `true` only when an edge was removed
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    /// Users following `user_id`, newest edge first
    async fn followers(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>>;

    /// Users that `user_id` follows, newest edge first
    async fn following(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// One notification with its actor and subject previews
    async fn find_details(&self, id: Snowflake) -> RepoResult<Option<NotificationDetails>>;

    /// The recipient's notifications, newest first
    async fn list_for_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<NotificationDetails>>;

    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Set the read flag if the notification belongs to `user_id`.
    /// Returns `false` when no such notification exists for that user.
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Returns the number of notifications that flipped to read
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message along with its initial read marks
    async fn create(&self, message: &Message) -> RepoResult<()>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Every message the user sent or received, read marks included
    async fn find_for_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// The conversation between two users, oldest first
    async fn find_conversation(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>>;

    /// Mark everything `peer_id` sent to `viewer_id` as read by the viewer
    async fn mark_thread_read(&self, viewer_id: Snowflake, peer_id: Snowflake) -> RepoResult<ReadReceipt>;

    /// Mark one message as read by the viewer
    async fn mark_read(&self, viewer_id: Snowflake, message_id: Snowflake) -> RepoResult<ReadReceipt>;
}

//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Views that join several entities go through small helper structs.

use social_core::{
    Attachment, CommentPreview, CommentStats, Message, NotificationDetails, Post, PostPreview,
    PostStats, ProfileStats, ReadReceipt, Thread, User, UserPreview,
};

use super::responses::{
    AttachmentResponse, CommentResponse, CurrentUserResponse, MessageResponse,
    NotificationCommentResponse, NotificationPostResponse, NotificationResponse,
    ProfilePostResponse, ProfileStatsResponse, ProfileUserResponse, PostResponse,
    PublicUserResponse, ReadReceiptResponse, ThreadMessageResponse, ThreadResponse,
    UserPreviewResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            website: user.website.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            website: user.website.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for ProfileUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            website: user.website.clone(),
        }
    }
}

impl From<ProfileStats> for ProfileStatsResponse {
    fn from(stats: ProfileStats) -> Self {
        Self {
            posts: stats.posts,
            followers: stats.followers,
            following: stats.following,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// A post with its counts and its author's profile
pub struct PostWithAuthor<'a> {
    pub stats: PostStats,
    pub author: &'a User,
}

impl From<PostWithAuthor<'_>> for PostResponse {
    fn from(data: PostWithAuthor<'_>) -> Self {
        let PostStats {
            post,
            likes_count,
            comments_count,
            liked,
        } = data.stats;

        Self {
            id: post.id.to_string(),
            author: PublicUserResponse::from(data.author),
            description: post.description,
            image: post.image,
            created_at: post.created_at,
            updated_at: post.updated_at,
            likes_count,
            comments_count,
            liked,
        }
    }
}

impl From<PostStats> for ProfilePostResponse {
    fn from(stats: PostStats) -> Self {
        Self::from(stats.post)
    }
}

impl From<Post> for ProfilePostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            image: post.image,
            description: post.description,
            created_at: post.created_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// A comment with its like state and its author's profile
pub struct CommentWithAuthor<'a> {
    pub stats: CommentStats,
    pub author: &'a User,
}

impl From<CommentWithAuthor<'_>> for CommentResponse {
    fn from(data: CommentWithAuthor<'_>) -> Self {
        let CommentStats {
            comment,
            likes_count,
            liked,
        } = data.stats;

        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user: PublicUserResponse::from(data.author),
            text: comment.text,
            created_at: comment.created_at,
            likes_count,
            liked,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<UserPreview> for UserPreviewResponse {
    fn from(user: UserPreview) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            avatar: user.avatar,
        }
    }
}

impl From<PostPreview> for NotificationPostResponse {
    fn from(post: PostPreview) -> Self {
        Self {
            id: post.id.to_string(),
            image: post.image,
            author: UserPreviewResponse::from(post.author),
        }
    }
}

impl From<CommentPreview> for NotificationCommentResponse {
    fn from(comment: CommentPreview) -> Self {
        Self {
            id: comment.id.to_string(),
            text: comment.text,
            post_id: comment.post_id.to_string(),
        }
    }
}

impl From<NotificationDetails> for NotificationResponse {
    fn from(details: NotificationDetails) -> Self {
        let notification = details.notification;
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.as_str().to_string(),
            is_read: notification.is_read,
            created_at: notification.created_at,
            from_user: details.from_user.map(UserPreviewResponse::from),
            post: details.post.map(NotificationPostResponse::from),
            comment: details.comment.map(NotificationCommentResponse::from),
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        Self {
            url: attachment.url,
            kind: attachment.kind,
        }
    }
}

fn read_by_strings(message: &Message) -> Vec<String> {
    message.read_by.iter().map(ToString::to_string).collect()
}

/// A message with both participants' profiles
pub struct MessageWithParticipants<'a> {
    pub message: Message,
    pub sender: &'a User,
    pub peer: &'a User,
}

impl From<MessageWithParticipants<'_>> for MessageResponse {
    fn from(data: MessageWithParticipants<'_>) -> Self {
        let read_by = read_by_strings(&data.message);
        let message = data.message;

        Self {
            id: message.id.to_string(),
            sender: PublicUserResponse::from(data.sender),
            peer: PublicUserResponse::from(data.peer),
            text: message.text,
            attachments: message
                .attachments
                .into_iter()
                .map(AttachmentResponse::from)
                .collect(),
            read_by,
            created_at: message.created_at,
        }
    }
}

impl From<Message> for ThreadMessageResponse {
    fn from(message: Message) -> Self {
        let read_by = read_by_strings(&message);

        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            peer_id: message.peer_id.to_string(),
            text: message.text,
            attachments: message
                .attachments
                .into_iter()
                .map(AttachmentResponse::from)
                .collect(),
            read_by,
            created_at: message.created_at,
        }
    }
}

/// A derived thread joined with the partner's profile
pub struct ThreadWithPeer<'a> {
    pub thread: Thread,
    pub peer: &'a User,
}

impl From<ThreadWithPeer<'_>> for ThreadResponse {
    fn from(data: ThreadWithPeer<'_>) -> Self {
        Self {
            peer: PublicUserResponse::from(data.peer),
            last_message: ThreadMessageResponse::from(data.thread.last_message),
            unread_count: data.thread.unread_count,
        }
    }
}

impl From<ReadReceipt> for ReadReceiptResponse {
    fn from(receipt: ReadReceipt) -> Self {
        Self {
            ok: true,
            matched: receipt.matched,
            modified: receipt.modified,
        }
    }
}

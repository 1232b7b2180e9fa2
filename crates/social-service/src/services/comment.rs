//! Comment service

use social_core::{Comment, DomainError, NotificationKind, Page, Snowflake, MAX_COMMENT_LENGTH};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithAuthor, CreateCommentRequest, LikeStatusResponse};

use super::context::ServiceContext;
use super::effects::NotificationSubject;
use super::error::{ServiceError, ServiceResult};
use super::lookup::{require_post, require_user, users_by_id};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post and notify its author
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let text = request.text.trim();
        let len = text.chars().count();
        if len == 0 {
            return Err(ServiceError::validation("Comment text is required"));
        }
        if len > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH,
            }
            .into());
        }

        let post = require_post(self.ctx, post_id).await?;
        let author = require_user(self.ctx, user_id).await?;

        let comment = Comment::new(self.ctx.generate_id(), post_id, user_id, text);
        self.ctx.comment_repo().create(&comment).await?;

        info!(user_id = %user_id, post_id = %post_id, comment_id = %comment.id, "Comment added");

        self.ctx.effects().notify(
            post.author_id,
            user_id,
            NotificationKind::Comment,
            NotificationSubject::comment(post_id, comment.id),
        );

        Ok(CommentResponse::from(CommentWithAuthor {
            stats: social_core::CommentStats {
                comment,
                likes_count: 0,
                liked: false,
            },
            author: &author,
        }))
    }

    /// Comments on a post, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
        page: Page,
    ) -> ServiceResult<Vec<CommentResponse>> {
        require_post(self.ctx, post_id).await?;
        let comments = self
            .ctx
            .comment_repo()
            .list_for_post(post_id, viewer, page)
            .await?;

        let authors = users_by_id(self.ctx, comments.iter().map(|c| c.comment.user_id)).await?;

        Ok(comments
            .into_iter()
            .filter_map(|stats| {
                let author = authors.get(&stats.comment.user_id)?;
                Some(CommentResponse::from(CommentWithAuthor { stats, author }))
            })
            .collect())
    }

    /// Ensure the caller likes the comment
    #[instrument(skip(self))]
    pub async fn like_comment(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<LikeStatusResponse> {
        let comment = self.require_comment(comment_id).await?;
        let comments = self.ctx.comment_repo();

        if comments.add_like(comment_id, user_id).await? {
            info!(user_id = %user_id, comment_id = %comment_id, "Comment liked");
            self.ctx.effects().notify(
                comment.user_id,
                user_id,
                NotificationKind::LikeComment,
                NotificationSubject::comment(comment.post_id, comment_id),
            );
        }

        Ok(LikeStatusResponse {
            liked: true,
            count: comments.count_likes(comment_id).await?,
        })
    }

    /// Ensure the caller does not like the comment
    #[instrument(skip(self))]
    pub async fn unlike_comment(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<LikeStatusResponse> {
        self.require_comment(comment_id).await?;
        let comments = self.ctx.comment_repo();

        if comments.remove_like(comment_id, user_id).await? {
            info!(user_id = %user_id, comment_id = %comment_id, "Comment unliked");
        }

        Ok(LikeStatusResponse {
            liked: false,
            count: comments.count_likes(comment_id).await?,
        })
    }

    async fn require_comment(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound(comment_id).into())
    }
}

//! Post service
//!
//! Handles post CRUD, feeds and the explore listing.

use social_core::{DomainError, ExploreSort, Page, Post, PostStats, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, ExploreQuery, PostResponse, PostWithAuthor, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lookup::{require_post, require_user, users_by_id};

/// Default page size of the explore listing
pub const DEFAULT_EXPLORE_LIMIT: i64 = 12;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author_id`
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author = require_user(self.ctx, author_id).await?;

        let description = request.description.trim().to_string();
        if description.is_empty() {
            return Err(ServiceError::validation("Description is required"));
        }

        let post = Post::new(self.ctx.generate_id(), author_id, description, request.image);
        self.ctx.post_repo().create(&post).await?;

        info!(user_id = %author_id, post_id = %post.id, "Post created");

        Ok(PostResponse::from(PostWithAuthor {
            stats: PostStats {
                post,
                likes_count: 0,
                comments_count: 0,
                liked: Some(false),
            },
            author: &author,
        }))
    }

    /// Get a single post; `liked` is filled in for authenticated viewers
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let stats = self
            .ctx
            .post_repo()
            .find_with_stats(post_id, viewer)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let mut views = self.with_authors(vec![stats]).await?;
        views
            .pop()
            .ok_or_else(|| ServiceError::internal(format!("author of post {post_id} is missing")))
    }

    /// All posts, newest first
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        page: Page,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().list(page, viewer).await?;
        self.with_authors(posts).await
    }

    /// One user's posts, newest first
    #[instrument(skip(self))]
    pub async fn list_user_posts(
        &self,
        author_id: Snowflake,
        page: Page,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        require_user(self.ctx, author_id).await?;
        let posts = self
            .ctx
            .post_repo()
            .list_by_author(author_id, page, viewer)
            .await?;
        self.with_authors(posts).await
    }

    /// Edit a post. Only its author may do so.
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        caller: Snowflake,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = require_post(self.ctx, post_id).await?;
        if !post.is_author(caller) {
            return Err(DomainError::NotPostOwner.into());
        }

        let description = request.description.map(|d| d.trim().to_string());
        if description.as_deref() == Some("") {
            return Err(ServiceError::validation("Description is required"));
        }

        post.edit(description, request.image);
        self.ctx.post_repo().update(&post).await?;

        info!(user_id = %caller, post_id = %post_id, "Post updated");

        self.get_post(post_id, Some(caller)).await
    }

    /// Delete a post together with its likes, comments and notifications
    #[instrument(skip(self))]
    pub async fn delete_post(&self, caller: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        let post = require_post(self.ctx, post_id).await?;
        if !post.is_author(caller) {
            return Err(DomainError::NotPostOwner.into());
        }

        self.ctx.post_repo().delete(post_id).await?;
        info!(user_id = %caller, post_id = %post_id, "Post deleted");

        Ok(())
    }

    /// Offset-paged discovery listing
    #[instrument(skip(self))]
    pub async fn explore(&self, query: ExploreQuery) -> ServiceResult<Vec<PostResponse>> {
        let sort = match query.sort.as_deref() {
            None | Some("") => ExploreSort::default(),
            Some(raw) => raw.parse::<ExploreSort>().map_err(ServiceError::validation)?,
        };
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_EXPLORE_LIMIT);
        let offset = (page - 1).saturating_mul(limit);

        let posts = self.ctx.post_repo().explore(sort, offset, limit).await?;
        self.with_authors(posts).await
    }

    /// Join author profiles, keeping input order. Posts whose author is gone are dropped.
    async fn with_authors(&self, posts: Vec<PostStats>) -> ServiceResult<Vec<PostResponse>> {
        let authors = users_by_id(self.ctx, posts.iter().map(|s| s.post.author_id)).await?;

        Ok(posts
            .into_iter()
            .filter_map(|stats| {
                let author = authors.get(&stats.post.author_id)?;
                Some(PostResponse::from(PostWithAuthor { stats, author }))
            })
            .collect())
    }
}

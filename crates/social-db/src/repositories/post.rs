//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::{
    DomainError, ExploreSort, Page, Post, PostRepository, PostStats, RepoResult, Snowflake,
};

use crate::models::{PostModel, PostStatsModel};

use super::error::map_db_error;

/// Post columns plus computed counts. `$1` is the viewer id, or NULL for anonymous reads.
const POST_STATS_SELECT: &str = r"
    SELECT p.id, p.author_id, p.description, p.image, p.created_at, p.updated_at,
        (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes_count,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
        CASE WHEN $1::BIGINT IS NULL THEN NULL
             ELSE EXISTS(SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1)
        END AS liked
    FROM posts p
";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, description, image, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_with_stats(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<PostStats>> {
        let result = sqlx::query_as::<_, PostStatsModel>(&format!(
            "{POST_STATS_SELECT} WHERE p.id = $2"
        ))
        .bind(viewer.map(Snowflake::into_inner))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PostStats::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page, viewer: Option<Snowflake>) -> RepoResult<Vec<PostStats>> {
        let results = sqlx::query_as::<_, PostStatsModel>(&format!(
            r"{POST_STATS_SELECT}
            WHERE ($2::BIGINT IS NULL OR p.id < $2)
            ORDER BY p.id DESC
            LIMIT $3
            "
        ))
        .bind(viewer.map(Snowflake::into_inner))
        .bind(page.before.map(Snowflake::into_inner))
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostStats::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_author(
        &self,
        author_id: Snowflake,
        page: Page,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Vec<PostStats>> {
        let results = sqlx::query_as::<_, PostStatsModel>(&format!(
            r"{POST_STATS_SELECT}
            WHERE p.author_id = $2 AND ($3::BIGINT IS NULL OR p.id < $3)
            ORDER BY p.id DESC
            LIMIT $4
            "
        ))
        .bind(viewer.map(Snowflake::into_inner))
        .bind(author_id.into_inner())
        .bind(page.before.map(Snowflake::into_inner))
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostStats::from).collect())
    }

    #[instrument(skip(self))]
    async fn explore(&self, sort: ExploreSort, offset: i64, limit: i64) -> RepoResult<Vec<PostStats>> {
        let query = match sort {
            ExploreSort::Trending => format!(
                "{POST_STATS_SELECT} ORDER BY likes_count DESC, p.id DESC OFFSET $2 LIMIT $3"
            ),
            ExploreSort::New => {
                format!("{POST_STATS_SELECT} ORDER BY p.id DESC OFFSET $2 LIMIT $3")
            }
            // Offset is meaningless for a random sample; `$2 >= 0` keeps the bind list uniform
            ExploreSort::Random => {
                format!("{POST_STATS_SELECT} WHERE $2 >= 0 ORDER BY RANDOM() LIMIT $3")
            }
        };

        let results = sqlx::query_as::<_, PostStatsModel>(&query)
            .bind(None::<i64>)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostStats::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, description, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.description)
        .bind(&post.image)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET description = $2, image = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.description)
        .bind(&post.image)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Likes, comments, comment likes and notifications go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::{Follow, FollowRepository, Page, RepoResult, Snowflake, User};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn create(&self, follow: &Follow) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO follows (follower_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            ",
        )
        .bind(follow.follower_id.into_inner())
        .bind(follow.following_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id.into_inner())
            .bind(following_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)
            ",
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    // Keyset on the counterpart's id keeps the cursor an id, like every other list
    #[instrument(skip(self))]
    async fn followers(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.email, u.username, u.full_name, u.avatar, u.bio, u.website,
                   u.created_at, u.updated_at
            FROM follows f
            INNER JOIN users u ON u.id = f.follower_id
            WHERE f.following_id = $1
              AND ($2::BIGINT IS NULL OR f.created_at < (
                  SELECT created_at FROM follows WHERE following_id = $1 AND follower_id = $2
              ))
            ORDER BY f.created_at DESC, u.id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.before.map(Snowflake::into_inner))
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn following(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.email, u.username, u.full_name, u.avatar, u.bio, u.website,
                   u.created_at, u.updated_at
            FROM follows f
            INNER JOIN users u ON u.id = f.following_id
            WHERE f.follower_id = $1
              AND ($2::BIGINT IS NULL OR f.created_at < (
                  SELECT created_at FROM follows WHERE follower_id = $1 AND following_id = $2
              ))
            ORDER BY f.created_at DESC, u.id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.before.map(Snowflake::into_inner))
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFollowRepository>();
    }
}

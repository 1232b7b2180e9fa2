//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::{
    Notification, NotificationDetails, NotificationRepository, Page, RepoResult, Snowflake,
};

use crate::models::NotificationDetailsModel;

use super::error::map_db_error;

/// Notification joined with its actor, post author and comment. Deleted
/// subjects cascade away, so the LEFT JOINs only guard against races.
const DETAILS_SELECT: &str = r"
    SELECT n.id, n.user_id, n.from_user_id, n.kind, n.post_id, n.comment_id, n.is_read, n.created_at,
        fu.username AS from_username, fu.avatar AS from_avatar,
        p.image AS post_image, pa.id AS post_author_id,
        pa.username AS post_author_username, pa.avatar AS post_author_avatar,
        c.text AS comment_text, c.post_id AS comment_post_id
    FROM notifications n
    LEFT JOIN users fu ON fu.id = n.from_user_id
    LEFT JOIN posts p ON p.id = n.post_id
    LEFT JOIN users pa ON pa.id = p.author_id
    LEFT JOIN comments c ON c.id = n.comment_id
";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, from_user_id, kind, post_id, comment_id, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(notification.from_user_id.into_inner())
        .bind(notification.kind.as_str())
        .bind(notification.post_id.map(Snowflake::into_inner))
        .bind(notification.comment_id.map(Snowflake::into_inner))
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_details(&self, id: Snowflake) -> RepoResult<Option<NotificationDetails>> {
        let result = sqlx::query_as::<_, NotificationDetailsModel>(&format!(
            "{DETAILS_SELECT} WHERE n.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(NotificationDetails::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> RepoResult<Vec<NotificationDetails>> {
        let results = sqlx::query_as::<_, NotificationDetailsModel>(&format!(
            r"{DETAILS_SELECT}
            WHERE n.user_id = $1 AND ($2::BIGINT IS NULL OR n.id < $2)
            ORDER BY n.id DESC
            LIMIT $3
            "
        ))
        .bind(user_id.into_inner())
        .bind(page.before.map(Snowflake::into_inner))
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(NotificationDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        // No `NOT is_read` filter: re-marking an already read notification still succeeds
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND NOT is_read
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

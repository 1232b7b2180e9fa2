//! PostgreSQL implementation of MessageRepository
//!
//! Read marks live in `message_reads`. Every query that returns messages folds
//! them back in with `array_agg`, so callers always see the full read-by set.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use social_core::{Message, MessageRepository, ReadReceipt, RepoResult, Snowflake};

use crate::models::MessageModel;

use super::error::map_db_error;

const MESSAGE_SELECT: &str = r"
    SELECT m.id, m.sender_id, m.peer_id, m.text, m.attachments, m.created_at,
        COALESCE(
            (SELECT array_agg(r.user_id ORDER BY r.user_id) FROM message_reads r WHERE r.message_id = m.id),
            '{}'::BIGINT[]
        ) AS read_by
    FROM messages m
";

#[derive(Debug, FromRow)]
struct ReceiptRow {
    matched: i64,
    modified: i64,
}

impl From<ReceiptRow> for ReadReceipt {
    fn from(row: ReceiptRow) -> Self {
        ReadReceipt {
            matched: u64::try_from(row.matched).unwrap_or_default(),
            modified: u64::try_from(row.modified).unwrap_or_default(),
        }
    }
}

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, peer_id, text, attachments, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.peer_id.into_inner())
        .bind(&message.text)
        .bind(Json(&message.attachments))
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let readers: Vec<i64> = message.read_by.iter().map(|id| id.into_inner()).collect();
        sqlx::query(
            r"
            INSERT INTO message_reads (message_id, user_id)
            SELECT $1, reader FROM UNNEST($2::BIGINT[]) AS reader
            ON CONFLICT (message_id, user_id) DO NOTHING
            ",
        )
        .bind(message.id.into_inner())
        .bind(&readers)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!("{MESSAGE_SELECT} WHERE m.id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_for_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            "{MESSAGE_SELECT} WHERE m.sender_id = $1 OR m.peer_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_conversation(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            r"{MESSAGE_SELECT}
            WHERE (m.sender_id = $1 AND m.peer_id = $2) OR (m.sender_id = $2 AND m.peer_id = $1)
            ORDER BY m.created_at ASC, m.id ASC
            "
        ))
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_thread_read(
        &self,
        viewer_id: Snowflake,
        peer_id: Snowflake,
    ) -> RepoResult<ReadReceipt> {
        let row = sqlx::query_as::<_, ReceiptRow>(
            r"
            WITH targets AS (
                SELECT m.id FROM messages m
                WHERE m.sender_id = $2 AND m.peer_id = $1
                  AND NOT EXISTS (
                      SELECT 1 FROM message_reads r WHERE r.message_id = m.id AND r.user_id = $1
                  )
            ),
            inserted AS (
                INSERT INTO message_reads (message_id, user_id)
                SELECT id, $1 FROM targets
                ON CONFLICT (message_id, user_id) DO NOTHING
                RETURNING 1
            )
            SELECT (SELECT COUNT(*) FROM targets) AS matched,
                   (SELECT COUNT(*) FROM inserted) AS modified
            ",
        )
        .bind(viewer_id.into_inner())
        .bind(peer_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, viewer_id: Snowflake, message_id: Snowflake) -> RepoResult<ReadReceipt> {
        let row = sqlx::query_as::<_, ReceiptRow>(
            r"
            WITH targets AS (
                SELECT m.id FROM messages m
                WHERE m.id = $2
                  AND NOT EXISTS (
                      SELECT 1 FROM message_reads r WHERE r.message_id = m.id AND r.user_id = $1
                  )
            ),
            inserted AS (
                INSERT INTO message_reads (message_id, user_id)
                SELECT id, $1 FROM targets
                ON CONFLICT (message_id, user_id) DO NOTHING
                RETURNING 1
            )
            SELECT (SELECT COUNT(*) FROM targets) AS matched,
                   (SELECT COUNT(*) FROM inserted) AS modified
            ",
        )
        .bind(viewer_id.into_inner())
        .bind(message_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }
}

//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentStatsModel {
    #[sqlx(flatten)]
    pub comment: CommentModel,
    pub likes_count: i64,
    pub liked: bool,
}

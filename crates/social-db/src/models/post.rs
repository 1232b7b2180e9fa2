//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post row with counts computed from the relation tables
#[derive(Debug, Clone, FromRow)]
pub struct PostStatsModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub likes_count: i64,
    pub comments_count: i64,
    /// NULL for anonymous viewers
    pub liked: Option<bool>,
}

//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum comment length in characters, after trimming
pub const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Text is stored trimmed.
    pub fn new(id: Snowflake, post_id: Snowflake, user_id: Snowflake, text: &str) -> Self {
        Self {
            id,
            post_id,
            user_id,
            text: text.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A comment joined with its like aggregates for one viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStats {
    pub comment: Comment,
    pub likes_count: i64,
    pub liked: bool,
}

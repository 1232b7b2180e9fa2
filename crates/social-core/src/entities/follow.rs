//! Follow edge - a directed relationship between two users

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Snowflake,
    pub following_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create an edge. Self-follows are rejected.
    pub fn new(follower_id: Snowflake, following_id: Snowflake) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::SelfFollow);
        }
        Ok(Self {
            follower_id,
            following_id,
            created_at: Utc::now(),
        })
    }
}

/// Follower/following/post counts shown on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub posts: i64,
    pub followers: i64,
    pub following: i64,
}

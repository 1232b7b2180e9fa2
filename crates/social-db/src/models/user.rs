//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table, without the password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated counters for a profile page
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ProfileStatsModel {
    pub posts: i64,
    pub followers: i64,
    pub following: i64,
}

//! Direct message database model

use chrono::{DateTime, Utc};
use social_core::Attachment;
use sqlx::types::Json;
use sqlx::FromRow;

/// A `messages` row with its read marks folded in through `array_agg`
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender_id: i64,
    pub peer_id: i64,
    pub text: String,
    pub attachments: Json<Vec<Attachment>>,
    pub read_by: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

//! Direct message entity
//!
//! There is no separate conversation record: the conversation between A and B
//! is every message whose `{sender, peer}` pair is `{A, B}` in either order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum message text length in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum number of attachments on a single message
pub const MAX_ATTACHMENTS: usize = 10;

/// Media reference attached to a message. Stored as JSON alongside the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    /// The recipient
    pub peer_id: Snowflake,
    pub text: String,
    pub attachments: Vec<Attachment>,
    /// Users who have acknowledged this message. Always contains the sender.
    pub read_by: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new outgoing message.
    ///
    /// The sender is recorded as having read their own message. Messages to
    /// oneself are rejected, as are messages with neither text nor attachments.
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        peer_id: Snowflake,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Self, DomainError> {
        if sender_id == peer_id {
            return Err(DomainError::SelfMessage);
        }

        let text = text.trim();
        if text.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_MESSAGE_LENGTH,
            });
        }
        if attachments.len() > MAX_ATTACHMENTS {
            return Err(DomainError::ValidationError(format!(
                "At most {MAX_ATTACHMENTS} attachments are allowed"
            )));
        }
        if text.is_empty() && attachments.is_empty() {
            return Err(DomainError::ValidationError(
                "Message must have text or attachments".to_string(),
            ));
        }

        Ok(Self {
            id,
            sender_id,
            peer_id,
            text: text.to_string(),
            attachments,
            read_by: vec![sender_id],
            created_at: Utc::now(),
        })
    }

    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.peer_id == user_id
    }

    /// The participant that is not `viewer`.
    ///
    /// `None` if the viewer is not part of this message, or if the message is a
    /// degenerate self-conversation.
    pub fn other_participant(&self, viewer: Snowflake) -> Option<Snowflake> {
        match (self.sender_id == viewer, self.peer_id == viewer) {
            (true, false) => Some(self.peer_id),
            (false, true) => Some(self.sender_id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_read_by(&self, user_id: Snowflake) -> bool {
        self.read_by.contains(&user_id)
    }

    /// Incoming to `viewer` and not yet acknowledged by them
    pub fn is_unread_for(&self, viewer: Snowflake) -> bool {
        self.peer_id == viewer && self.sender_id != viewer && !self.is_read_by(viewer)
    }
}

/// Result of a mark-read operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadReceipt {
    /// Messages that were unread for the viewer when the call started
    pub matched: u64,
    /// Read marks actually recorded by this call
    pub modified: u64,
}

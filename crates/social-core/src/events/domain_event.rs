//! Domain events - pushed to connected clients after state changes
//!
//! Events carry the same JSON the REST API would return for the created
//! resource, so clients can render them without a refetch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    /// A direct message was sent
    MessageCreate(Value),
    /// A notification was appended to the recipient's log
    NotificationCreate(Value),
}

impl DomainEvent {
    /// Event name as it appears in the gateway dispatch `t` field
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreate(_) => "MESSAGE_CREATE",
            Self::NotificationCreate(_) => "NOTIFICATION_CREATE",
        }
    }

    pub fn payload(&self) -> &Value {
        match self {
            Self::MessageCreate(data) | Self::NotificationCreate(data) => data,
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            Self::MessageCreate(data) | Self::NotificationCreate(data) => data,
        }
    }
}

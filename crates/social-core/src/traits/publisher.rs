//! Event publisher port

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::value_objects::Snowflake;

/// Delivers events to a user's live sessions.
///
/// Delivery is best-effort: implementations never fail, they report how many
/// sessions were reached.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_to_user(&self, user_id: Snowflake, event: DomainEvent) -> usize;
}

/// Publisher used when no gateway is attached
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish_to_user(&self, _user_id: Snowflake, _event: DomainEvent) -> usize {
        0
    }
}

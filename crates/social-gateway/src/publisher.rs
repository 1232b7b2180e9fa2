//! `EventPublisher` backed by the local connection registry

use async_trait::async_trait;
use social_core::{DomainEvent, EventPublisher, Snowflake};
use std::sync::Arc;

use crate::connection::ConnectionManager;

/// Pushes domain events to every gateway session of a user
#[derive(Debug, Clone)]
pub struct GatewayPublisher {
    connections: Arc<ConnectionManager>,
}

impl GatewayPublisher {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl EventPublisher for GatewayPublisher {
    async fn publish_to_user(&self, user_id: Snowflake, event: DomainEvent) -> usize {
        self.connections.send_to_user(user_id, &event).await
    }
}

//! Gateway state

use crate::connection::ConnectionManager;
use crate::protocol::HelloPayload;
use social_service::ServiceContext;
use std::sync::Arc;

/// Shared dependencies of the `/gateway` route
#[derive(Clone)]
pub struct GatewayState {
    /// Service context; the gateway uses its JWT service and user repository
    service_context: Arc<ServiceContext>,
    connection_manager: Arc<ConnectionManager>,
    heartbeat_interval_ms: u64,
}

impl GatewayState {
    pub fn new(service_context: Arc<ServiceContext>, connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            service_context,
            connection_manager,
            heartbeat_interval_ms: HelloPayload::DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Override the heartbeat interval announced in Hello
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval_ms: u64) -> Self {
        self.heartbeat_interval_ms = interval_ms;
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    pub fn heartbeat_interval_ms(&self) -> u64 {
        self.heartbeat_interval_ms
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("heartbeat_interval_ms", &self.heartbeat_interval_ms)
            .finish()
    }
}

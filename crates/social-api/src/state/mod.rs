//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, the database pool for health probes and the gateway.

use std::sync::Arc;

use axum::extract::FromRef;
use social_common::{AppConfig, JwtService};
use social_db::PgPool;
use social_gateway::GatewayState;
use social_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    pool: PgPool,
    gateway: GatewayState,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        config: AppConfig,
        pool: PgPool,
        gateway: GatewayState,
    ) -> Self {
        Self {
            service_context,
            config: Arc::new(config),
            pool,
            gateway,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Pool used by the readiness probe
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn gateway(&self) -> &GatewayState {
        &self.gateway
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("gateway", &self.gateway)
            .finish()
    }
}

//! Server setup and initialization
//!
//! Wires configuration, the database, services and the push gateway into one
//! axum application and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use social_common::{AppConfig, AppError, JwtService};
use social_core::SnowflakeGenerator;
use social_db::{
    create_pool, run_migrations, PgCommentRepository, PgFollowRepository, PgLikeRepository,
    PgMessageRepository, PgNotificationRepository, PgPool, PgPostRepository, PgUserRepository,
};
use social_gateway::{ConnectionManager, GatewayPublisher, GatewayState};
use social_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete application: REST API, health checks and gateway
///
/// # Errors
/// Fails only on an unusable rate limit configuration.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config().clone();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let gateway = social_gateway::create_router().with_state(state.gateway().clone());

    let router = api.merge(health_routes()).merge(gateway);
    Ok(apply_middleware(router, &config).with_state(state))
}

/// Connect to PostgreSQL, apply migrations if enabled, and build the state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = social_db::DatabaseConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    build_state(config, pool)
}

/// Assemble repositories, services and the gateway around an existing pool
pub fn build_state(config: AppConfig, pool: PgPool) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Services push through the same registry the gateway serves from
    let connections = ConnectionManager::new_shared();
    let publisher = Arc::new(GatewayPublisher::new(Arc::clone(&connections)));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .publisher(publisher)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;
    let service_context = Arc::new(service_context);

    let gateway = GatewayState::new(Arc::clone(&service_context), connections);

    Ok(AppState::new(service_context, config, pool, gateway))
}

/// Run the HTTP server until it fails
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // Rate limiting keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await
}

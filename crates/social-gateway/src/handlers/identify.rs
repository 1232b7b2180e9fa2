//! Identify handler (op 2)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{CloseCode, GatewayMessage, IdentifyPayload, ReadyPayload, READY};
use crate::server::GatewayState;
use social_service::dto::PublicUserResponse;
use std::sync::Arc;

pub struct IdentifyHandler;

impl IdentifyHandler {
    /// Authenticate the connection and answer with a `READY` dispatch
    ///
    /// A bad token or unknown user gets op 9 and close 4004. A second
    /// Identify on the same socket closes with 4005.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: IdentifyPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        if connection.is_authenticated().await {
            tracing::warn!(
                session_id = %connection.session_id(),
                "Client sent Identify while already authenticated"
            );
            return Ok(Some(CloseCode::AlreadyAuthenticated));
        }

        let claims = match state
            .service_context()
            .jwt_service()
            .validate_access_token(payload.bare_token())
        {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(session_id = %connection.session_id(), error = %e, "Token validation failed");
                return Self::reject(connection).await;
            }
        };
        let Ok(user_id) = claims.user_id() else {
            return Self::reject(connection).await;
        };

        let Some(user) = state.service_context().user_repo().find_by_id(user_id).await? else {
            tracing::debug!(user_id = %user_id, "Identify for unknown user");
            return Self::reject(connection).await;
        };

        let session_id = connection.session_id().to_string();
        if !state
            .connection_manager()
            .authenticate_connection(&session_id, user_id)
            .await
        {
            return Ok(Some(CloseCode::AlreadyAuthenticated));
        }

        let ready = ReadyPayload {
            session_id: session_id.clone(),
            user: PublicUserResponse::from(&user),
        };
        let data = serde_json::to_value(&ready)
            .map_err(|e| HandlerError::Internal(format!("Failed to encode READY: {e}")))?;

        connection
            .dispatch(|seq| GatewayMessage::dispatch(READY, seq, data))
            .await
            .map_err(|_| HandlerError::Internal("Failed to send READY".to_string()))?;

        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            username = %user.username,
            "Gateway session identified"
        );

        Ok(None)
    }

    async fn reject(connection: &Arc<Connection>) -> HandlerResult<Option<CloseCode>> {
        if connection.send(GatewayMessage::invalid_session()).await.is_err() {
            tracing::debug!(session_id = %connection.session_id(), "Socket gone before InvalidSession");
        }
        Ok(Some(CloseCode::AuthenticationFailed))
    }
}

//! Op code handlers
//!
//! Routes frames received from a client to the handler for their op.

mod error;
mod heartbeat;
mod identify;

pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use identify::IdentifyHandler;

use crate::connection::Connection;
use crate::protocol::{CloseCode, GatewayMessage, OpCode};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle one client frame
    ///
    /// `Ok(Some(code))` means the socket must be closed with `code`.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        if let Some(code) = refuse(message.op, connection.is_authenticated().await) {
            tracing::warn!(
                session_id = %connection.session_id(),
                op = %message.op,
                close_code = %code,
                "Refusing client op code"
            );
            return Ok(Some(code));
        }

        match message.op {
            OpCode::Identify => {
                let payload = message.as_identify().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Identify payload".to_string())
                })?;

                IdentifyHandler::handle(state, connection, payload).await
            }
            OpCode::Heartbeat => {
                let seq = message.as_heartbeat_seq().flatten();
                HeartbeatHandler::handle(connection, seq).await
            }
            // Unreachable after the is_client_op check
            _ => Ok(Some(CloseCode::UnknownOpcode)),
        }
    }
}

/// Close code for an op the client may not send in its current state
fn refuse(op: OpCode, authenticated: bool) -> Option<CloseCode> {
    match (op.is_client_op(), authenticated) {
        (true, _) => None,
        (false, false) => Some(CloseCode::NotAuthenticated),
        (false, true) => Some(CloseCode::UnknownOpcode),
    }
}

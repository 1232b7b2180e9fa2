//! WebSocket handler
//!
//! One reader task, one writer task and one heartbeat watchdog per socket.
//! Everything bound for the client goes through the connection's channel so
//! pushes, acks and close frames are serialized by the writer.

use crate::connection::{Connection, ConnectionState, Outbound};
use crate::handlers::MessageDispatcher;
use crate::protocol::{CloseCode, GatewayMessage, HelloPayload};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, timeout};

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// How long the writer gets to flush a close frame
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::channel::<Outbound>(MESSAGE_BUFFER_SIZE);

    let connection = state
        .connection_manager()
        .add_connection(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let heartbeat_ms = state.heartbeat_interval_ms();
    let hello = GatewayMessage::hello(HelloPayload::with_interval(heartbeat_ms));
    if let Ok(json) = hello.to_json() {
        if ws_sink.send(Message::Text(json)).await.is_err() {
            tracing::warn!(session_id = %session_id, "Failed to send Hello message");
            cleanup_connection(&state, &connection).await;
            return;
        }
    }

    let state_recv = state.clone();
    let connection_recv = Arc::clone(&connection);
    let mut recv_task = tokio::spawn(async move {
        let session_id = connection_recv.session_id().to_string();
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(close_code) =
                        handle_text_message(&state_recv, &connection_recv, &text).await
                    {
                        return Some(close_code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(session_id = %session_id, "Binary messages not supported");
                    return Some(CloseCode::DecodeError);
                }
                // Pong is handled automatically by axum
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id, "Client closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "WebSocket error");
                    return Some(CloseCode::UnknownError);
                }
            }
        }
        None
    });

    let session_id_send = session_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Message(msg) => {
                    let Ok(json) = msg.to_json() else {
                        tracing::warn!(session_id = %session_id_send, message = %msg, "Failed to encode frame");
                        continue;
                    };
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::warn!(session_id = %session_id_send, "Failed to send message to WebSocket");
                        break;
                    }
                }
                Outbound::Close(code) => {
                    let frame = CloseFrame {
                        code: code.as_u16(),
                        reason: Cow::Borrowed(code.description()),
                    };
                    if ws_sink.send(Message::Close(Some(frame))).await.is_err() {
                        tracing::debug!(session_id = %session_id_send, "Close frame not delivered");
                    }
                    break;
                }
            }
        }

        if ws_sink.close().await.is_err() {
            tracing::trace!(session_id = %session_id_send, "Socket already closed");
        }
    });

    let connection_hb = Arc::clone(&connection);
    let mut heartbeat_task = tokio::spawn(async move {
        let heartbeat_timeout = Duration::from_millis(heartbeat_ms * 2);
        let mut check_interval = interval(Duration::from_millis((heartbeat_ms / 2).max(1)));

        loop {
            check_interval.tick().await;

            let since = connection_hb.time_since_heartbeat().await;
            if since > heartbeat_timeout {
                tracing::warn!(
                    session_id = %connection_hb.session_id(),
                    time_since_ms = since.as_millis(),
                    "Connection timed out (no heartbeat)"
                );
                connection_hb.close(CloseCode::SessionTimeout).await;
                break;
            }
        }
    });

    tokio::select! {
        result = &mut recv_task => {
            if let Ok(Some(close_code)) = result {
                tracing::debug!(session_id = %session_id, close_code = %close_code, "Closing connection");
                connection.close(close_code).await;
                flush(&mut send_task).await;
            }
        }
        _ = &mut send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
        _ = &mut heartbeat_task => {
            flush(&mut send_task).await;
        }
    }

    recv_task.abort();
    send_task.abort();
    heartbeat_task.abort();

    cleanup_connection(&state, &connection).await;
}

/// Give the writer a moment to deliver a queued close frame
async fn flush(send_task: &mut tokio::task::JoinHandle<()>) {
    if timeout(CLOSE_GRACE, send_task).await.is_err() {
        tracing::debug!("Writer did not finish within the close grace period");
    }
}

/// Parse and dispatch one text frame; `Err` carries the close code
async fn handle_text_message(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), CloseCode> {
    let message = match GatewayMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Failed to parse message"
            );
            return Err(CloseCode::DecodeError);
        }
    };

    tracing::trace!(session_id = %connection.session_id(), op = %message.op, "Received message");

    match MessageDispatcher::dispatch(state, connection, message).await {
        Ok(Some(close_code)) => Err(close_code),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!(session_id = %connection.session_id(), error = %e, "Handler error");
            Err(e.to_close_code())
        }
    }
}

async fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    connection.set_state(ConnectionState::Disconnected).await;
    state
        .connection_manager()
        .remove_connection(connection.session_id())
        .await;

    let user_id = connection.user_id().await;
    tracing::info!(
        session_id = %connection.session_id(),
        user_id = ?user_id,
        age_secs = connection.age().as_secs(),
        "WebSocket connection closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: &T) {}

    // `on_upgrade` spawns the socket future onto the runtime, so it must be Send.
    // Checked at compile time; never called.
    #[allow(dead_code)]
    fn socket_futures_are_send(
        state: &GatewayState,
        socket: WebSocket,
        connection: &Arc<Connection>,
    ) {
        assert_send(&handle_socket(state.clone(), socket));
        assert_send(&cleanup_connection(state, connection));
    }
}

//! Individual WebSocket connection

use crate::protocol::{CloseCode, GatewayMessage};
use social_core::Snowflake;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, RwLock};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connection established, waiting for Identify
    Connecting,
    /// Successfully authenticated
    Connected,
    /// Connection is closed
    Disconnected,
}

/// What the socket writer task receives
#[derive(Debug, Clone)]
pub enum Outbound {
    /// A frame to serialize and send
    Message(GatewayMessage),
    /// Send a close frame and stop writing
    Close(CloseCode),
}

/// A single WebSocket connection
pub struct Connection {
    session_id: String,

    /// Authenticated user ID (None until Identify)
    user_id: RwLock<Option<Snowflake>>,

    state: RwLock<ConnectionState>,

    /// Channel feeding the socket writer task
    sender: mpsc::Sender<Outbound>,

    /// Last dispatch sequence number sent
    sequence: AtomicU64,

    last_heartbeat: RwLock<Instant>,

    created_at: Instant,
}

impl Connection {
    pub fn new(session_id: String, sender: mpsc::Sender<Outbound>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            user_id: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            sequence: AtomicU64::new(0),
            last_heartbeat: RwLock::new(Instant::now()),
            created_at: Instant::now(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the user ID (if authenticated)
    pub async fn user_id(&self) -> Option<Snowflake> {
        *self.user_id.read().await
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    pub async fn set_state(&self, state: ConnectionState) {
        *self.state.write().await = state;
    }

    /// Bind the connection to a user. Returns false if it was already bound.
    pub async fn authenticate(&self, user_id: Snowflake) -> bool {
        let mut current = self.user_id.write().await;
        if current.is_some() {
            return false;
        }
        *current = Some(user_id);
        drop(current);

        self.set_state(ConnectionState::Connected).await;
        true
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user_id.read().await.is_some()
    }

    /// Get the next dispatch sequence number, starting at 1
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub async fn record_heartbeat(&self) {
        *self.last_heartbeat.write().await = Instant::now();
    }

    pub async fn time_since_heartbeat(&self) -> Duration {
        self.last_heartbeat.read().await.elapsed()
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Queue a frame for this connection
    pub async fn send(&self, message: GatewayMessage) -> Result<(), mpsc::error::SendError<Outbound>> {
        self.sender.send(Outbound::Message(message)).await
    }

    /// Queue a dispatch, assigning it the next sequence number
    pub async fn dispatch(
        &self,
        build: impl FnOnce(u64) -> GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<Outbound>> {
        let message = build(self.next_sequence());
        self.send(message).await
    }

    /// Ask the writer task to close the socket with `code`
    pub async fn close(&self, code: CloseCode) {
        if self.sender.send(Outbound::Close(code)).await.is_err() {
            tracing::trace!(session_id = %self.session_id, "Close requested on finished writer");
        }
    }

    /// Check if the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("age", &self.created_at.elapsed())
            .finish()
    }
}

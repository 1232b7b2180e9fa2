//! Connection manager
//!
//! Registry of live sockets, keyed by session and by user, on `DashMap`.

use super::{Connection, Outbound};
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use social_core::{DomainEvent, Snowflake};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// User ID to session IDs mapping, identified sessions only
    user_connections: DashMap<Snowflake, HashSet<String>>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
        }
    }

    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new, not yet identified, connection
    pub fn add_connection(&self, session_id: String, sender: mpsc::Sender<Outbound>) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections
            .insert(session_id.clone(), Arc::clone(&connection));

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection and its user mapping
    pub async fn remove_connection(&self, session_id: &str) {
        let Some((_, connection)) = self.connections.remove(session_id) else {
            return;
        };

        if let Some(user_id) = connection.user_id().await {
            if let Some(mut sessions) = self.user_connections.get_mut(&user_id) {
                sessions.remove(session_id);
            }
            self.user_connections
                .remove_if(&user_id, |_, sessions| sessions.is_empty());
        }

        tracing::debug!(session_id = %session_id, "Connection removed");
    }

    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| Arc::clone(r.value()))
    }

    /// Link a connection to a user
    ///
    /// Returns false if the session is unknown or already identified.
    pub async fn authenticate_connection(&self, session_id: &str, user_id: Snowflake) -> bool {
        let Some(connection) = self.get_connection(session_id) else {
            return false;
        };
        if !connection.authenticate(user_id).await {
            return false;
        }

        self.user_connections
            .entry(user_id)
            .or_default()
            .insert(session_id.to_string());

        tracing::debug!(session_id = %session_id, user_id = %user_id, "Connection authenticated");
        true
    }

    /// Get all identified connections of a user
    pub fn get_user_connections(&self, user_id: Snowflake) -> Vec<Arc<Connection>> {
        self.user_connections
            .get(&user_id)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.get_connection(sid))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dispatch an event to every session of a user
    ///
    /// Each session numbers the dispatch with its own sequence. Returns how
    /// many sessions accepted the frame.
    pub async fn send_to_user(&self, user_id: Snowflake, event: &DomainEvent) -> usize {
        let mut sent = 0;

        for conn in self.get_user_connections(user_id) {
            let result = conn
                .dispatch(|seq| GatewayMessage::event(event.clone(), seq))
                .await;
            if result.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(
            user_id = %user_id,
            event = event.event_type(),
            sent,
            "Event sent to user connections"
        );

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of users with at least one identified session
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }

    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .finish()
    }
}

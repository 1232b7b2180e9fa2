//! Connection management
//!
//! Per-socket state and the registry used to route pushes to a user's sessions.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionState, Outbound};
pub use manager::ConnectionManager;

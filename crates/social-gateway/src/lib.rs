//! # social-gateway
//!
//! WebSocket push gateway. Clients connect, identify with an access token and
//! then receive `MESSAGE_CREATE` and `NOTIFICATION_CREATE` dispatches for
//! their user. The REST server hosts the `/gateway` route and hands services a
//! [`GatewayPublisher`] so they can push without knowing about sockets.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod publisher;
pub mod server;

pub use connection::ConnectionManager;
pub use publisher::GatewayPublisher;
pub use server::{create_router, gateway_handler, GatewayState};

//! Gateway route
//!
//! The REST server merges [`create_router`] into its own router, so the
//! gateway shares the HTTP listener and middleware.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};

/// Router serving the WebSocket upgrade at `/gateway`
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/gateway", get(gateway_handler))
}

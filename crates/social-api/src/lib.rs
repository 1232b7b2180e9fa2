//! # social-api
//!
//! REST API server built with Axum, hosting the push gateway alongside.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{build_state, create_app, create_app_state, run};
pub use state::AppState;

//! Integration test utilities for the social server
//!
//! Helpers for end-to-end tests against the REST API and push gateway.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

/// Start a [`TestServer`] or return from the calling test when none is available
#[macro_export]
macro_rules! server_or_skip {
    () => {
        match $crate::TestServer::start()
            .await
            .expect("Failed to start server")
        {
            Some(server) => server,
            None => return,
        }
    };
}

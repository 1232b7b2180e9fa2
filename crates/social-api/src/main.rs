//! Social API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p social-api --bin social-server
//! ```
//!
//! Configuration is read from environment variables and an optional `.env`.

use social_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Log format depends on APP_ENV, so configuration loads first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Starting social API server"
    );

    if let Err(e) = social_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

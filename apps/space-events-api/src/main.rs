use axum_helpers::server::{create_production_app, create_router};
use core_config::load_env_file;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::MongoConnection;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Upper bound on post-drain cleanup
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Defaults < .env file < process environment
    let env_file = load_env_file()?;

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config.environment, &config.log);

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        env_file = ?env_file,
        "Starting Space Events API"
    );

    // Fatal on failure: the service never serves without a database
    let connection = MongoConnection::connect(&config.mongodb)
        .await
        .inspect_err(|e| error!(error = %e, "Could not connect to MongoDB, exiting"))?;

    let state = AppState {
        config,
        connection: connection.clone(),
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs, CORS, tracing and JSON fallbacks
    let router = create_router::<openapi::ApiDoc>(api_routes);

    info!(
        address = %state.config.server.address(),
        "Serving with graceful shutdown ({}s cleanup timeout)",
        SHUTDOWN_TIMEOUT.as_secs()
    );

    create_production_app(router, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing MongoDB connection");
        connection.close().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Space Events API shutdown complete");
    Ok(())
}

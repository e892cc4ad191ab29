//! Products API - REST server

use axum_helpers::{create_cors_layer, create_production_app, create_router, parse_origins};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let cors = match state.config.server.cors_allowed_origins.as_deref() {
        Some(origins) => {
            let header = axum::http::HeaderName::from_bytes(
                state.config.api_key.header.to_ascii_lowercase().as_bytes(),
            )?;
            Some(create_cors_layer(parse_origins(origins)?, header))
        }
        None => None,
    };

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state)?,
        api::health::router(state.clone()),
        cors,
    );

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let client = state.mongo_client.clone();
    create_production_app(router, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

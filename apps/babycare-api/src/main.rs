use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env file is fine; the process environment still applies
    let _ = dotenvy::dotenv();

    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    // Not fatal: the driver keeps retrying server selection per request
    match database::mongodb::ping(&mongo_client).await {
        Ok(()) => info!(
            "Pinged your deployment. Successfully connected to MongoDB database: {}",
            config.mongodb.database()
        ),
        Err(e) => warn!(error = %e, "MongoDB ping failed at startup"),
    }

    if let Err(e) = api::init_indexes(&db).await {
        warn!(error = %e, "Index initialization failed");
    }

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!("Starting BabyCare Store API (30s shutdown timeout)");

    let server_config = state.config.server.clone();
    let mongo_client = state.mongo_client;

    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("BabyCare Store API shutdown complete");
    Ok(())
}

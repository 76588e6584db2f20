use std::sync::Arc;

use axum::Router;
use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_estimator::{Catalogs, EstimatorService, handlers};
use tracing::info;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Catalogs are required: refuse to serve without them
    let catalogs = Catalogs::load(&config.catalogs)?;
    let service = EstimatorService::new(Arc::new(catalogs));

    let api_routes = Router::new().merge(handlers::router(service));

    // create_router adds docs, / and /health, and middleware to our composed routes
    let app = create_router::<openapi::ApiDoc>(api_routes, config.app, config.cors_layer()?);

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting cost estimator"
    );

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Cost estimator shutdown complete");
    Ok(())
}

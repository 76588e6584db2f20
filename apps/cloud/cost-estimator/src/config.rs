use std::path::PathBuf;

use axum_helpers::{create_cors_layer, create_permissive_cors_layer, parse_origins};
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use domain_estimator::CatalogPaths;
use tower_http::cors::CorsLayer;

// Re-export Environment for use in other modules
pub use core_config::Environment;

pub const DEFAULT_PRICING_CATALOG_PATH: &str = "config/pricing.json";
pub const DEFAULT_PROFILE_CATALOG_PATH: &str = "config/profiles.json";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub catalogs: CatalogPaths,
    /// Comma-separated allowed origins; unset means any origin
    pub cors_origins: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        let catalogs = CatalogPaths {
            pricing: PathBuf::from(env_or_default(
                "PRICING_CATALOG_PATH",
                DEFAULT_PRICING_CATALOG_PATH,
            )),
            profiles: PathBuf::from(env_or_default(
                "PROFILE_CATALOG_PATH",
                DEFAULT_PROFILE_CATALOG_PATH,
            )),
        };

        let cors_origins = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|raw| !raw.trim().is_empty());

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            catalogs,
            cors_origins,
        })
    }

    /// CORS policy for the configured origins.
    pub fn cors_layer(&self) -> eyre::Result<CorsLayer> {
        match &self.cors_origins {
            Some(raw) => {
                let origins = parse_origins(raw).map_err(|e| eyre::eyre!(e))?;
                Ok(create_cors_layer(origins))
            }
            None => Ok(create_permissive_cors_layer()),
        }
    }
}

//! Configuration for Products API

use axum_helpers::ApiKeyConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub api_key: ApiKeyConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let api_key = ApiKeyConfig::from_env()?;

        mongodb
            .app_name
            .get_or_insert_with(|| app.name.to_string());

        Ok(Self {
            app,
            mongodb,
            server,
            api_key,
            environment,
        })
    }
}

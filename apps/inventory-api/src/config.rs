//! Configuration for the Inventory API

use axum::http::HeaderValue;
use axum_helpers::{parse_allowed_origins, JwtConfig};
use core_config::{
    app_info, env_parse_or, env_required,
    server::{GrpcConfig, ServerConfig},
    AppInfo, FromEnv,
};
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub grpc: GrpcConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<HeaderValue>,
    /// Deadline for each store round-trip
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let cors_origins = parse_allowed_origins(&env_required("CORS_ALLOWED_ORIGIN")?)?;

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            grpc: GrpcConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cors_origins,
            store_timeout: Duration::from_secs(env_parse_or("STORE_TIMEOUT_SECS", 5)?),
        })
    }
}

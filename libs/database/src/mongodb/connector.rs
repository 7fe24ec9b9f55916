use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("{operation} timed out after {limit:?}")]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },
}

/// Parse the connection string and apply pool and timeout settings.
///
/// Does not touch the network beyond SRV/TXT lookups for `mongodb+srv://` urls.
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(config.url()).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.server_selection_timeout());
    options.app_name = config.app_name.clone();
    if options.default_database.is_none() {
        options.default_database = Some(config.database().to_string());
    }

    Ok(options)
}

/// Connect and verify the deployment answers a `ping`.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "inventory");
/// let client = connect(&config).await?;
/// let db = client.database(config.database());
/// ```
#[instrument(skip(config), fields(url = %config.redacted_url(), database = %config.database()))]
pub async fn connect(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Connecting to MongoDB");

    let client = Client::with_options(client_options(config).await?)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Connected to MongoDB");
    Ok(client)
}

/// [`connect`] with exponential backoff, for startup against a database that
/// may still be coming up. `None` uses [`RetryConfig::default`].
///
/// # Example
/// ```ignore
/// use core_config::FromEnv;
/// use database::{RetryConfig, mongodb::{MongoConfig, connect_with_retry}};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_with_retry(&config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect(config), policy).await,
        None => retry(|| connect(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_apply_config() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "inventory")
            .with_app_name("inventory-api");

        let options = client_options(&config).await.unwrap();

        assert_eq!(options.max_pool_size, Some(100));
        assert_eq!(options.min_pool_size, Some(5));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.app_name.as_deref(), Some("inventory-api"));
        assert_eq!(options.default_database.as_deref(), Some("inventory"));
    }

    #[tokio::test]
    async fn test_client_options_keep_database_from_url() {
        let config = MongoConfig::with_database("mongodb://localhost:27017/fromurl", "inventory");
        let options = client_options(&config).await.unwrap();
        assert_eq!(options.default_database.as_deref(), Some("fromurl"));
    }

    #[tokio::test]
    async fn test_client_options_reject_bad_scheme() {
        let config = MongoConfig::new("postgres://localhost:5432");
        assert!(matches!(
            client_options(&config).await,
            Err(MongoError::Mongo(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "inventory_test");
        assert!(connect(&config).await.is_ok());
    }
}

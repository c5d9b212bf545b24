use mongodb::{
    Client,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::DatabaseResult;

/// Parse the connection string and apply pool, timeout and Stable API settings
pub async fn client_options(config: &MongoConfig) -> DatabaseResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    if config.stable_api {
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
    }

    Ok(options)
}

/// Connect to MongoDB with default pool settings
///
/// # Example
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("BabyCare-8");
/// ```
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Connect using a MongoConfig
///
/// The driver connects lazily, so this only fails on a malformed URL or an
/// unresolvable SRV record. Use [`super::ping`] to verify the server.
///
/// # Example
/// ```ignore
/// use core_config::FromEnv;
/// use database::mongodb::{MongoConfig, connect_from_config, ping};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ping(&client).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(
        url = %config.redacted_url(),
        database = %config.database,
        "Creating MongoDB client"
    );

    let options = client_options(config).await?;
    let client = Client::with_options(options)?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_applies_config() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "shop")
            .with_app_name("babycare");

        let options = client_options(&config).await.unwrap();

        assert_eq!(options.max_pool_size, Some(100));
        assert_eq!(options.min_pool_size, Some(5));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(options.app_name.as_deref(), Some("babycare"));
        assert!(options.server_api.is_some());
    }

    #[tokio::test]
    async fn test_client_options_without_stable_api() {
        let config = MongoConfig::new("mongodb://localhost:27017").without_stable_api();
        let options = client_options(&config).await.unwrap();
        assert!(options.server_api.is_none());
    }

    #[tokio::test]
    async fn test_client_options_rejects_bad_scheme() {
        let config = MongoConfig::new("postgres://localhost:5432");
        assert!(client_options(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_connect_does_not_require_server() {
        // Nothing listens on this port; client construction is still fine.
        let result = connect("mongodb://127.0.0.1:1").await;
        assert!(result.is_ok());
    }
}

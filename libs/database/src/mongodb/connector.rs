use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tracing::{error, info};

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// An established MongoDB connection bound to one database.
///
/// A value of this type only exists after the server answered a `ping`, so
/// handing out the database handle never races against startup. Clones share
/// the same underlying client and the same closed flag.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, MongoConnection};
///
/// let connection = MongoConnection::connect(&MongoConfig::default()).await?;
/// let db = connection.database();
/// // ...
/// connection.close().await;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConnection {
    client: Client,
    database: Database,
    closed: Arc<AtomicBool>,
}

impl MongoConnection {
    /// Connect and verify reachability with a single `ping`.
    ///
    /// The ping is bounded by [`MongoConfig::connect_timeout_ms`]. Failures are
    /// logged and returned as-is; no retries are attempted.
    pub async fn connect(config: &MongoConfig) -> Result<Self, MongoError> {
        let url = config.redacted_url();
        info!(url = %url, database = %config.database, "Connecting to MongoDB");

        let client = build_client(config).await.inspect_err(|e| {
            error!(url = %url, error = %e, "Invalid MongoDB configuration");
        })?;

        let timeout = Duration::from_millis(config.connect_timeout_ms);
        let admin = client.database("admin");
        let ping = admin.run_command(doc! { "ping": 1 });

        match tokio::time::timeout(timeout, ping).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!(url = %url, error = %e, "Failed to connect to MongoDB");
                return Err(MongoError::ConnectionFailed(e.to_string()));
            }
            Err(_) => {
                error!(url = %url, timeout_ms = config.connect_timeout_ms, "Timed out connecting to MongoDB");
                return Err(MongoError::ConnectionFailed(format!(
                    "no response from {} within {}ms",
                    url, config.connect_timeout_ms
                )));
            }
        }

        info!(database = %config.database, "Successfully connected to MongoDB");

        Ok(Self {
            database: client.database(&config.database),
            client,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle to the configured database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Shut the client down. Only the first call does any work.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}

async fn build_client(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    let timeout = Duration::from_millis(config.connect_timeout_ms);
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let config = MongoConfig::new("postgres://localhost:5432");
        let result = MongoConnection::connect(&config).await;
        assert!(matches!(result, Err(MongoError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_connect_unreachable_server_fails_fast() {
        let config = MongoConfig::new("mongodb://127.0.0.1:1/?directConnection=true")
            .with_connect_timeout_ms(200);

        let started = std::time::Instant::now();
        let result = MongoConnection::connect(&config).await;

        assert!(matches!(result, Err(MongoError::ConnectionFailed(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_and_close_idempotent() {
        let url = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "connector_test");

        let connection = MongoConnection::connect(&config).await.unwrap();
        assert_eq!(connection.database().name(), "connector_test");
        assert!(!connection.is_closed());

        connection.close().await;
        connection.close().await;
        assert!(connection.is_closed());
    }
}

//! Application state management.
//!
//! The state contains the loaded configuration and the live MongoDB
//! connection, which owns the driver's internally pooled client.

use database::mongodb::MongoConnection;

use crate::config::Config;

/// Shared application state.
///
/// Cloning is cheap: the connection shares its underlying pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// MongoDB connection established at startup
    pub connection: MongoConnection,
}

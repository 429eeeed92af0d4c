//! Database connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection lifecycle and health checks
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All database features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, MongoConnection};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "space_db");
//! let connection = MongoConnection::connect(&config).await?;
//! let events = connection.database().collection::<Document>("events");
//!
//! connection.close().await;
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;

//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation and cross-cutting middleware
//! - Health and readiness helpers
//! - Graceful shutdown coordination with post-drain cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes.merge(health_router()));
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), async {
//!     connection.close().await;
//! })
//! .await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{DOCS_PATH, OPENAPI_PATH, create_production_app, create_router, serve_until};
pub use health::{HealthCheckFuture, health_handler, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;

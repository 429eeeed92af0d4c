//! API routes module
//!
//! Routes are mounted at the root, without an `/api` prefix.

pub mod events;
pub mod health;
pub mod info;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(events::router(state))
        .merge(info::router(state.clone()))
        .merge(health::router(state.clone()))
        .merge(health_router())
}

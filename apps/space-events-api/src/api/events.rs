//! Events API routes

use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use std::sync::Arc;

use crate::state::AppState;

/// Create the events router over the shared database handle
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.connection.database());
    let service = Arc::new(EventService::new(repository));

    domain_events::events_router().with_state(service)
}

//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;
use serde_json::Value;

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check
///
/// Pings MongoDB; 200 when reachable, 503 otherwise.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "admin",
    responses(
        (status = 200, description = "MongoDB reachable: `{\"status\": \"ready\", \"mongodb\": \"connected\"}`"),
        (status = 503, description = "MongoDB unreachable: `{\"status\": \"not ready\", \"mongodb\": \"disconnected\"}`")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let client = state.connection.client().clone();

    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = check_health_detailed(&client).await;
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

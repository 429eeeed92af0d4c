//! Informational endpoints: welcome and build metadata

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::server::DOCS_PATH;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Space Events API";
pub const SERVICE_DESCRIPTION: &str = "API for managing space-related events and historical data";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Endpoints {
    #[schema(example = "/events")]
    pub events: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to the Space Events API")]
    pub message: String,
    #[schema(example = "/docs")]
    pub docs: String,
    pub endpoints: Endpoints,
}

/// Build and connection metadata. Key names contain spaces.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AboutResponse {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(rename = "build datetime")]
    pub build_datetime: String,
    #[serde(rename = "api version")]
    pub api_version: String,
    /// Connection string with credentials masked
    #[serde(rename = "mongo URI")]
    #[schema(example = "mongodb://***@localhost:27017")]
    pub mongo_uri: String,
    #[schema(example = "space_db")]
    pub database: String,
}

/// Create the informational router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/about", get(read_about))
        .with_state(state)
}

/// Welcome message with pointers to the docs and the events collection
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Welcome metadata", body = WelcomeResponse)
    )
)]
pub async fn read_root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to the {}", SERVICE_NAME),
        docs: DOCS_PATH.to_string(),
        endpoints: Endpoints {
            events: "/events".to_string(),
        },
    })
}

/// Service identity, build metadata and database target
#[utoipa::path(
    get,
    path = "/about",
    tag = "admin",
    responses(
        (status = 200, description = "Build and connection metadata", body = AboutResponse)
    )
)]
pub async fn read_about(State(state): State<AppState>) -> Json<AboutResponse> {
    let config = &state.config;

    Json(AboutResponse {
        name: SERVICE_NAME.to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        version: config.build.version.clone(),
        build_datetime: config.build.build_datetime.clone(),
        api_version: config.build.api_version.clone(),
        mongo_uri: config.mongodb.redacted_url(),
        database: config.mongodb.database().to_string(),
    })
}

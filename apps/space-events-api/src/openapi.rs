//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{health, info};

/// Service-level endpoints; event paths are merged in from the domain
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Space Events API",
        description = "API for managing space-related events and historical data"
    ),
    paths(info::read_root, info::read_about, health::readiness_check),
    components(schemas(info::WelcomeResponse, info::Endpoints, info::AboutResponse)),
    tags(
        (name = "root", description = "Service entry point"),
        (name = "admin", description = "Build metadata and readiness")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_events::ApiDoc::openapi());
        doc
    }
}

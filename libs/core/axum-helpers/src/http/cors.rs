use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer.
///
/// Any origin, method and request header is allowed, and preflight requests
/// are answered directly by the layer. Credentials are not allowed, since a
/// wildcard origin cannot be combined with them.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

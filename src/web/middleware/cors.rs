//! CORS middleware configuration.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

/// Create a CORS layer from configuration.
///
/// With no configured origins the layer is permissive (any origin, no
/// credentials), which suits local development. With origins it switches
/// to credentials mode with an explicit allow list.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed_origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        return CorsLayer::new()
            .allow_methods(METHODS)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(parsed_origins)
}

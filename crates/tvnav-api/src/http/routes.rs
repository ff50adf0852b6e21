//! HTTP route definitions.
//!
//! ```text
//! GET /health         - Health check
//! GET /api/status     - Reachability with server timestamp
//! GET /api/navigator  - Navigator debug snapshot (404 when detached)
//! ```

use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::monitoring;
use crate::state::AppState;

/// Create the status router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/status", get(monitoring::api_status))
        .route("/navigator", get(monitoring::navigator_state));

    Router::new()
        .route("/health", get(monitoring::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, credentials allowed.
///
/// The request origin is echoed back since a literal `*` cannot be combined
/// with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

//! HTTP API for the lookup proxy.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use axum::{http::Method, middleware as axum_middleware, routing::get, Router};
use lookup_core::Dispatcher;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create new application state.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // One route per lookup kind
        .route("/api/phone-osint", get(handlers::phone_lookup))
        .route("/api/truecaller-osint", get(handlers::truecaller_lookup))
        .route("/api/bin-osint", get(handlers::bin_lookup))
        .route("/api/ifsc-osint", get(handlers::ifsc_lookup))
        .route("/api/insta-osint", get(handlers::instagram_profile_lookup))
        .route("/api/insta-posts", get(handlers::instagram_posts_lookup))
        .route("/api/aadhaar-osint", get(handlers::aadhaar_lookup))
        // Generic dispatch by kind slug
        .route("/api/lookup/:kind", get(handlers::lookup_by_kind))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

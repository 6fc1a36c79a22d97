// src/api/http/router.rs
// HTTP router composition

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::comment::analyze_comment_handler;
use super::handlers::health_handler;
use crate::state::AppState;

/// Value of the `x-api-version` response header
pub const API_VERSION: &str = "1";

/// Create the router with all endpoints
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let version_header = SetResponseHeaderLayer::if_not_present(
        header::HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/comment",
            post(analyze_comment_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .layer(version_header)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    http::HeaderName,
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{health, horoscope};
use crate::middleware::logging::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/liveness", get(health::liveness));

    // Both spellings are served directly instead of redirecting
    let horoscope_routes = Router::new()
        .route(
            "/daily-horoscope/",
            get(horoscope::daily_horoscope_get).post(horoscope::daily_horoscope_post),
        )
        .route(
            "/daily-horoscope",
            get(horoscope::daily_horoscope_get).post(horoscope::daily_horoscope_post),
        );

    Router::new()
        .route("/", get(horoscope::root))
        .merge(horoscope_routes)
        .merge(health_routes)
        .fallback(horoscope::not_found)
        .layer(create_cors_layer())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Unrestricted CORS: any origin, method and header
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TRACE_ID_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

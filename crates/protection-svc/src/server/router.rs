//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/contents",
            get(handlers::list_contents).post(handlers::create_content),
        )
        .route(
            "/contents/:id",
            get(handlers::get_content)
                .put(handlers::update_content)
                .delete(handlers::delete_content),
        )
        .route(
            "/protection-systems",
            get(handlers::list_protection_systems).post(handlers::create_protection_system),
        )
        .route(
            "/devices",
            get(handlers::list_devices).post(handlers::create_device),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

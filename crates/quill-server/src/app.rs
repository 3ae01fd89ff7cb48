//! Router construction.
//!
//! Builds the axum router with all routes and middleware. Routes are
//! exact and case-sensitive; anything that doesn't match one of the
//! three operations falls through to the router's 404 response.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/view/{title}", get(handlers::pages::view))
        .route("/edit/{title}", get(handlers::pages::edit))
        .route("/save/{title}", post(handlers::pages::save))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

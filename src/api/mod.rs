//! HTTP API module
//!
//! The click surface of the popover: two buttons, the elapsed label and the
//! status bar preference.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(timer_handler))
        .route("/timer/start-reset", post(start_reset_handler))
        .route("/timer/pause-resume", post(pause_resume_handler))
        .route("/preferences", get(get_preferences_handler).put(put_preferences_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

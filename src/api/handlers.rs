//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Preferences};
use super::responses::{ActionResponse, HealthResponse, StatusResponse, TimerResponse};

/// Handle POST /timer/start-reset - Start an idle timer or reset a running one
pub async fn start_reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    match state.start_or_reset() {
        Ok((transition, timer)) => {
            info!("Start/reset endpoint called - {}", transition.as_str());
            Ok(Json(ActionResponse::new(transition, timer)))
        }
        Err(e) => {
            error!("Failed to start or reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/pause-resume - Pause or resume a running timer
pub async fn pause_resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    match state.pause_or_resume() {
        Ok((transition, timer)) => {
            info!("Pause/resume endpoint called - {}", transition.as_str());
            Ok(Json(ActionResponse::new(transition, timer)))
        }
        Err(e) => {
            error!("Failed to pause or resume timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Return the rendered popover
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    state.snapshot()
        .map(|timer| Json(TimerResponse::new(timer)))
        .map_err(|e| {
            error!("Failed to get timer state: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Handle GET /status - Return timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let preferences = match state.get_preferences() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get preferences: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        preferences,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /preferences
pub async fn get_preferences_handler(State(state): State<Arc<AppState>>) -> Result<Json<Preferences>, StatusCode> {
    state.get_preferences().map(Json).map_err(|e| {
        error!("Failed to get preferences: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle PUT /preferences - Replace and persist preferences
pub async fn put_preferences_handler(
    State(state): State<Arc<AppState>>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>, StatusCode> {
    match state.set_preferences(preferences) {
        Ok(saved) => {
            info!("Preferences endpoint called - show_status_bar={}", saved.show_status_bar);
            Ok(Json(saved))
        }
        Err(e) => {
            error!("Failed to update preferences: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

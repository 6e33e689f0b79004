//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{render, TimerView},
    state::{Preferences, TimerSnapshot, Transition},
};

/// Response for the timer action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Name of the transition that was applied, `ignored` for a no-op
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub view: TimerView,
}

impl ActionResponse {
    pub fn new(transition: Transition, timer: TimerSnapshot) -> Self {
        Self {
            status: transition.as_str().to_string(),
            message: describe(transition).to_string(),
            timestamp: Utc::now(),
            view: render(&timer),
            timer,
        }
    }
}

fn describe(transition: Transition) -> &'static str {
    match transition {
        Transition::Started => "Timer started",
        Transition::Reset => "Timer reset",
        Transition::Paused => "Timer paused",
        Transition::Resumed => "Timer resumed",
        Transition::Ticked => "Timer advanced",
        Transition::Expired => "Timer expired",
        Transition::Ignored => "Timer is not running, nothing to do",
    }
}

/// Response for GET /timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub timer: TimerSnapshot,
    pub view: TimerView,
}

impl TimerResponse {
    pub fn new(timer: TimerSnapshot) -> Self {
        Self {
            view: render(&timer),
            timer,
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub preferences: Preferences,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

//! Timer state structure and snapshots

use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

use crate::display::format_elapsed;

/// Coarse phase of the timer derived from the running/paused flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Timer state owned by the controller
///
/// `start_reference` is present exactly when `running` is set, `paused` is only
/// ever set while running, and `elapsed` never exceeds `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub running: bool,
    pub paused: bool,
    pub start_reference: Option<Instant>,
    pub elapsed: Duration,
    pub duration: Duration,
}

impl TimerState {
    /// Create an idle timer for the given duration
    pub fn new(duration: Duration) -> Self {
        Self {
            running: false,
            paused: false,
            start_reference: None,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Running,
            (true, true) => Phase::Paused,
        }
    }

    /// Check the structural invariants of the state
    pub fn invariants_hold(&self) -> bool {
        self.elapsed <= self.duration
            && self.start_reference.is_some() == self.running
            && (self.running || !self.paused)
    }
}

/// Serializable copy of the timer published to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub elapsed_seconds: u64,
    pub duration_seconds: u64,
    pub formatted_elapsed: String,
    /// Number of expiries since the process started
    pub expirations: u64,
}

impl TimerSnapshot {
    pub fn capture(state: &TimerState, expirations: u64) -> Self {
        Self {
            phase: state.phase(),
            running: state.running,
            paused: state.paused,
            elapsed_seconds: state.elapsed.as_secs(),
            duration_seconds: state.duration.as_secs(),
            formatted_elapsed: format_elapsed(state.elapsed),
            expirations,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::capture(&TimerState::new(Duration::ZERO), 0)
    }
}

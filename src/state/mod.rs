//! State management module
//!
//! This module contains the timer state machine, the shared application state
//! and the persisted preferences.

pub mod timer_state;
pub mod controller;
pub mod preferences;
pub mod app_state;

// Re-export main types
pub use timer_state::{Phase, TimerSnapshot, TimerState};
pub use controller::{TimerController, Transition};
pub use preferences::{Preferences, PreferenceStore};
pub use app_state::AppState;

//! Zeno - a menu-bar style focus timer
//!
//! The timer runs as a small local daemon: an HTTP API plays the part of the
//! popover's buttons, an optional stdout stream feeds a status bar, and a
//! desktop notification fires when the configured duration elapses.

pub mod config;
pub mod display;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

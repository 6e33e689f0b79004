//! External service module
//!
//! This module contains the notification interface used by the timer and the
//! desktop backends that deliver notifications.

pub mod notification;

// Re-export main types
pub use notification::*;

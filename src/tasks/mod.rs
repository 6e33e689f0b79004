//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick;
pub mod notification_delivery;
pub mod status_line;

// Re-export main functions
pub use tick::{spawn_tick_task, TICK_PERIOD};
pub use notification_delivery::notification_delivery_task;
pub use status_line::status_line_task;

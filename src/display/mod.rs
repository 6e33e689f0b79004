//! Display module
//!
//! Pure rendering of timer snapshots; nothing here mutates state.

pub mod view;

// Re-export main functions
pub use view::{format_elapsed, render, TimerView};

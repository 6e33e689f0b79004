//! Rendering of the timer popover

use std::time::Duration;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::{Phase, TimerSnapshot};

pub const APP_TITLE: &str = "Zeno";
pub const ELAPSED_CAPTION: &str = "Time elapsed";

/// Format a duration as `MM:SS`, truncating fractional seconds
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Everything the popover shows for one state of the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub title: String,
    pub caption: String,
    pub label: String,
    /// Caption of the start/reset button
    pub primary: String,
    /// Caption of the pause/resume button
    pub secondary: String,
    pub secondary_enabled: bool,
    pub phase: Phase,
}

impl TimerView {
    /// One status-bar line: `{"text", "tooltip", "class"}` as JSON
    pub fn status_line(&self) -> String {
        json!({
            "text": self.label,
            "tooltip": format!("{} - {} {}", self.title, self.caption.to_lowercase(), self.label),
            "class": self.phase.as_str(),
        })
        .to_string()
    }
}

/// Render the popover for a snapshot
pub fn render(snapshot: &TimerSnapshot) -> TimerView {
    TimerView {
        title: APP_TITLE.to_string(),
        caption: ELAPSED_CAPTION.to_string(),
        label: snapshot.formatted_elapsed.clone(),
        primary: if snapshot.running { "Reset" } else { "Start" }.to_string(),
        secondary: if snapshot.paused { "Resume" } else { "Pause" }.to_string(),
        secondary_enabled: snapshot.running,
        phase: snapshot.phase,
    }
}

//! Status-line render task
//!
//! Re-renders the popover whenever the timer or the preferences change and
//! writes one line per render, the format status bars read from a custom
//! module. A hidden status bar entry is an empty line.

use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    display::render,
    state::{AppState, Preferences, TimerSnapshot},
};

/// Line to print for a snapshot under the given preferences
pub fn status_line(snapshot: &TimerSnapshot, preferences: &Preferences) -> String {
    if preferences.show_status_bar {
        render(snapshot).status_line()
    } else {
        String::new()
    }
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> std::io::Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

/// Write a status line after every state change until the channels close
pub async fn status_line_task<W: AsyncWrite + Unpin>(state: Arc<AppState>, mut out: W) {
    info!("Starting status line task");

    let mut timer_rx = state.timer_update_tx.subscribe();
    let mut preferences_rx = state.preferences_tx.subscribe();

    loop {
        let line = {
            let snapshot = timer_rx.borrow_and_update().clone();
            let preferences = *preferences_rx.borrow_and_update();
            status_line(&snapshot, &preferences)
        };

        if let Err(e) = write_line(&mut out, &line).await {
            warn!("Failed to write status line: {}", e);
            break;
        }
        debug!("Status line: {}", line);

        tokio::select! {
            changed = timer_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = preferences_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("Status line task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use crate::{services::RecordingNotifier, state::PreferenceStore};
    use tempfile::TempDir;

    #[test]
    fn test_hidden_status_bar_is_empty_line() {
        let snapshot = TimerSnapshot::default();
        let hidden = Preferences { show_status_bar: false };
        assert_eq!(status_line(&snapshot, &hidden), "");
        assert!(status_line(&snapshot, &Preferences::default()).contains("\"00:00\""));
    }

    #[tokio::test]
    async fn test_renders_on_every_change() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Duration::from_secs(10),
            Arc::new(RecordingNotifier::new()),
            PreferenceStore::new(dir.path().join("preferences.json")),
        ));
        let (writer, mut reader) = tokio::io::duplex(4096);
        let handle = tokio::spawn(status_line_task(Arc::clone(&state), writer));

        tokio::time::sleep(Duration::from_millis(50)).await;
        state.start_or_reset().unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        state.set_show_status_bar(false).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
        let _ = handle.await;

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"idle\""));
        assert!(lines[1].contains("\"running\""));
        assert_eq!(lines[2], "");
    }
}

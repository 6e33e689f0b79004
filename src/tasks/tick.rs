//! Periodic tick background task

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{error, info};

use crate::state::{app_state::clock_now, AppState, Transition};

/// Cadence of the display refresh
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Register the tick task; abort the returned handle to cancel it
pub fn spawn_tick_task(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tick_task(state, period).await;
    })
}

async fn tick_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick task every {:?}", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        match state.tick(clock_now()) {
            Ok((Transition::Expired, _)) => {
                info!("Timer expired, notification requested");
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to advance timer: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::RecordingNotifier,
        state::{Phase, PreferenceStore},
    };
    use tempfile::TempDir;

    fn app_state(dir: &TempDir, notifier: Arc<RecordingNotifier>) -> Arc<AppState> {
        Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Duration::from_secs(10),
            notifier,
            PreferenceStore::new(dir.path().join("preferences.json")),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_advance_running_timer() {
        let dir = TempDir::new().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let state = app_state(&dir, notifier.clone());
        let handle = spawn_tick_task(Arc::clone(&state), TICK_PERIOD);

        state.start_or_reset().unwrap();
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.elapsed_seconds, 3);
        assert!(notifier.calls().is_empty());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_fires_once_then_goes_idle() {
        let dir = TempDir::new().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let state = app_state(&dir, notifier.clone());
        let handle = spawn_tick_task(Arc::clone(&state), TICK_PERIOD);

        state.start_or_reset().unwrap();
        tokio::time::sleep(Duration::from_secs(15)).await;

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.elapsed_seconds, 10);
        assert_eq!(snapshot.formatted_elapsed, "00:10");
        assert_eq!(notifier.calls().len(), 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_interval_is_excluded() {
        let dir = TempDir::new().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let state = app_state(&dir, notifier.clone());
        let handle = spawn_tick_task(Arc::clone(&state), TICK_PERIOD);

        state.start_or_reset().unwrap();
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        state.pause_or_resume().unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.snapshot().unwrap().phase, Phase::Paused);

        state.pause_or_resume().unwrap();
        tokio::time::sleep(Duration::from_millis(2_600)).await;

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.elapsed_seconds, 5);
        assert!(notifier.calls().is_empty());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_task_stops_ticking() {
        let dir = TempDir::new().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let state = app_state(&dir, notifier.clone());
        let handle = spawn_tick_task(Arc::clone(&state), TICK_PERIOD);

        state.start_or_reset().unwrap();
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        tokio::time::sleep(Duration::from_secs(20)).await;
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert!(notifier.calls().is_empty());
    }
}

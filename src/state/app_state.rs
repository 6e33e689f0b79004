//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::services::Notifier;
use super::{Preferences, PreferenceStore, TimerController, TimerSnapshot, Transition};

/// Notifier shared between the controller and the rest of the application
pub type SharedNotifier = Arc<dyn Notifier + Send + Sync>;

/// Current instant from the runtime clock
///
/// Goes through tokio so a paused test runtime drives the timer as well.
pub fn clock_now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Main application state that owns the timer and the display preferences
pub struct AppState {
    /// Timer state machine; every action and tick goes through this lock
    pub timer: Mutex<TimerController<SharedNotifier>>,
    /// Display preferences and where they are persisted
    pub preferences: Mutex<Preferences>,
    pub preference_store: PreferenceStore,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Channel for preference updates
    pub preferences_tx: watch::Sender<Preferences>,
    /// Keep the receivers alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    pub _preferences_rx: watch::Receiver<Preferences>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(
        port: u16,
        host: String,
        duration: Duration,
        notifier: SharedNotifier,
        preference_store: PreferenceStore,
    ) -> Self {
        let timer = TimerController::new(duration, notifier);
        let initial = TimerSnapshot::capture(timer.state(), 0);
        let preferences = preference_store.load();

        let (timer_update_tx, timer_update_rx) = watch::channel(initial);
        let (preferences_tx, preferences_rx) = watch::channel(preferences);

        Self {
            timer: Mutex::new(timer),
            preferences: Mutex::new(preferences),
            preference_store,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            preferences_tx,
            _timer_update_rx: timer_update_rx,
            _preferences_rx: preferences_rx,
        }
    }

    /// Apply an operation to the timer and publish the result to observers
    fn apply<F>(&self, action: &str, operation: F) -> Result<(Transition, TimerSnapshot), String>
    where
        F: FnOnce(&mut TimerController<SharedNotifier>) -> Transition,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let transition = operation(&mut *timer);
        let snapshot = TimerSnapshot::capture(timer.state(), timer.expirations());

        // Publish under the lock so observers see snapshots in transition order
        if transition.changed_state() {
            if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
                warn!("Failed to send timer update: {}", e);
            }
        }
        drop(timer);

        if action != "tick" || transition == Transition::Expired {
            self.record_action(transition.as_str());
        }

        Ok((transition, snapshot))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start an idle timer or reset a running one
    pub fn start_or_reset(&self) -> Result<(Transition, TimerSnapshot), String> {
        let result = self.apply("start-reset", |timer| timer.start_or_reset(clock_now()))?;
        info!("Start/reset requested: {}", result.0.as_str());
        Ok(result)
    }

    /// Pause a running timer or resume a paused one
    pub fn pause_or_resume(&self) -> Result<(Transition, TimerSnapshot), String> {
        let result = self.apply("pause-resume", |timer| timer.pause_or_resume(clock_now()))?;
        info!("Pause/resume requested: {}", result.0.as_str());
        Ok(result)
    }

    /// Advance the timer to `now`
    pub fn tick(&self, now: Instant) -> Result<(Transition, TimerSnapshot), String> {
        let result = self.apply("tick", |timer| timer.on_tick(now))?;
        if result.0 == Transition::Ticked {
            debug!("Tick: {}", result.1.formatted_elapsed);
        }
        Ok(result)
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| TimerSnapshot::capture(timer.state(), timer.expirations()))
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get current preferences
    pub fn get_preferences(&self) -> Result<Preferences, String> {
        self.preferences.lock()
            .map(|prefs| *prefs)
            .map_err(|e| format!("Failed to lock preferences: {}", e))
    }

    /// Replace preferences, persist them and notify watchers
    pub fn set_preferences(&self, new_preferences: Preferences) -> Result<Preferences, String> {
        let mut prefs = self.preferences.lock()
            .map_err(|e| format!("Failed to lock preferences: {}", e))?;

        self.preference_store.save(&new_preferences)
            .map_err(|e| format!("Failed to persist preferences: {:#}", e))?;
        *prefs = new_preferences;
        drop(prefs);

        info!("Show status bar set to: {}", new_preferences.show_status_bar);
        self.record_action("preferences");

        if let Err(e) = self.preferences_tx.send(new_preferences) {
            warn!("Failed to send preferences update: {}", e);
        }

        Ok(new_preferences)
    }

    pub fn set_show_status_bar(&self, show: bool) -> Result<Preferences, String> {
        self.set_preferences(Preferences { show_status_bar: show })
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

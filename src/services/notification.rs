//! Desktop notification delivery
//!
//! The timer only sees the [`Notifier`] trait. In the running daemon that is a
//! [`ChannelNotifier`] which hands the request to the delivery task, so the
//! timer never waits on the desktop notification service.

use std::sync::{Arc, Mutex};
use notify_rust::Notification as DesktopNotification;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Identifier attached to expiry notifications
pub const NOTIFICATION_ID: &str = "timer.timeUp";

const APP_NAME: &str = "Zeno";
const SOUND_NAME: &str = "default";

/// Fire-and-forget notification sink
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

/// A notification request handed to a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub sound: bool,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            identifier: NOTIFICATION_ID.to_string(),
            title: title.into(),
            body: body.into(),
            sound: true,
        }
    }
}

/// Notifier that forwards requests to the delivery task
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with the receiving end for the delivery task
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(e) = self.tx.send(Notification::new(title, body)) {
            warn!("Notification dropped, delivery task is gone: {}", e.0.title);
        }
    }
}

/// Notifier that records every request instead of delivering it
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(title, body)` pairs received so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((title.to_string(), body.to_string()));
        }
    }
}

/// Available notification backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Native desktop notifications through notify-rust
    Desktop,
    /// Write the notification to the log only
    Log,
}

impl Backend {
    /// Pick the backend for the current platform
    pub fn detect() -> Self {
        if cfg!(any(unix, target_os = "windows")) {
            Self::Desktop
        } else {
            Self::Log
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Log => "log",
        }
    }

    /// Deliver a notification through this backend
    ///
    /// Showing a desktop notification blocks on the platform service, so it
    /// runs on the blocking pool.
    pub async fn send(&self, notification: &Notification) -> Result<(), String> {
        match self {
            Self::Desktop => {
                let request = notification.clone();
                tokio::task::spawn_blocking(move || show_desktop(&request))
                    .await
                    .map_err(|e| format!("Notification task failed: {}", e))??;
                debug!("Notification {} delivered via {}", notification.identifier, self.name());
                Ok(())
            }
            Self::Log => {
                info!("[{}] {}: {}", notification.identifier, notification.title, notification.body);
                Ok(())
            }
        }
    }
}

fn show_desktop(notification: &Notification) -> Result<(), String> {
    let mut desktop = DesktopNotification::new();
    desktop
        .appname(APP_NAME)
        .summary(&notification.title)
        .body(&notification.body)
        .icon("clock");
    if notification.sound {
        desktop.sound_name(SOUND_NAME);
    }

    desktop
        .show()
        .map(|_| ())
        .map_err(|e| format!("Failed to show notification: {}", e))
}

/// Check at startup that notifications can be shown; the result is advisory
pub async fn request_permission(backend: Backend) -> bool {
    match backend {
        Backend::Desktop => {
            let granted = tokio::task::spawn_blocking(probe_notification_server)
                .await
                .unwrap_or_else(|e| Err(format!("Notification probe failed: {}", e)));
            match granted {
                Ok(server) => {
                    info!("Notification permission granted: true ({})", server);
                    true
                }
                Err(e) => {
                    warn!("Error requesting notification permission: {}", e);
                    false
                }
            }
        }
        Backend::Log => {
            info!("Notifications will be written to the log");
            true
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_server() -> Result<String, String> {
    notify_rust::get_server_information()
        .map(|info| format!("{} {}", info.name, info.version))
        .map_err(|e| e.to_string())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn probe_notification_server() -> Result<String, String> {
    // The system prompts for permission on the first notification
    Ok("system notification center".to_string())
}

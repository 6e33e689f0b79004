//! Notification delivery background task

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::services::{Backend, Notification};

/// Deliver queued notifications until every sender is dropped
///
/// Failures are logged and dropped; there is no retry.
pub async fn notification_delivery_task(mut rx: mpsc::UnboundedReceiver<Notification>, backend: Backend) {
    info!("Starting notification delivery task ({})", backend.name());

    while let Some(notification) = rx.recv().await {
        info!("Delivering notification {}", notification.identifier);
        if let Err(e) = backend.send(&notification).await {
            warn!("Notification delivery failed: {}", e);
        }
    }

    info!("Notification delivery task stopped");
}

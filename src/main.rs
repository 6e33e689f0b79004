//! Zeno - a menu-bar style focus timer
//!
//! This is the main entry point for the zeno daemon.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use zeno::{
    config::Config,
    state::{AppState, PreferenceStore},
    api::create_router,
    services::{request_permission, Backend, ChannelNotifier},
    tasks::{notification_delivery_task, spawn_tick_task, status_line_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays free for the status line
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!("zeno={},tower_http=info", config.log_level()))
        .init();

    info!("Starting zeno v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s",
          config.host, config.port, config.duration);

    // Advisory only; the timer runs whether or not notifications can be shown
    let backend = Backend::detect();
    request_permission(backend).await;

    let (notifier, notification_rx) = ChannelNotifier::channel();
    tokio::spawn(notification_delivery_task(notification_rx, backend));

    let preference_store = PreferenceStore::new(config.preferences_path());
    info!("Preferences: {}", preference_store.path().display());

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_duration(),
        Arc::new(notifier),
        preference_store,
    ));

    let tick_handle = spawn_tick_task(Arc::clone(&state), TICK_PERIOD);

    let status_handle = config.status_line.then(|| {
        let status_state = Arc::clone(&state);
        tokio::spawn(async move {
            status_line_task(status_state, tokio::io::stdout()).await;
        })
    });

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer              - Current timer and rendered view");
    info!("  POST /timer/start-reset  - Start or reset the timer");
    info!("  POST /timer/pause-resume - Pause or resume the timer");
    info!("  GET  /preferences        - Display preferences");
    info!("  PUT  /preferences        - Update display preferences");
    info!("  GET  /status             - Timer and server status");
    info!("  GET  /health             - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    tick_handle.abort();
    if let Some(handle) = status_handle {
        handle.abort();
    }

    info!("Server shutdown complete");
    Ok(())
}

//! Tomato Clock - A state-managed HTTP service hosting a Pomodoro timer
//!
//! This is the main entry point for the tomato-clock application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use tomato_clock::{
    api::create_router,
    config::Config,
    services::{NotificationQueue, StderrAlert},
    state::AppState,
    tasks::{countdown_task, notification_task},
    timer::TokioTickDriver,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomato-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, work={}min, break={}min, mode={:?}, notifier={:?}",
        config.host, config.port, config.work, config.break_minutes, config.mode, config.notifier
    );

    let durations = config.durations().map_err(|e| anyhow!(e))?;

    // Wire the controller's capabilities to their background tasks
    let (driver, tick_rx) = TokioTickDriver::new();
    let (notification_queue, notification_rx) = NotificationQueue::new();

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        durations,
        config.mode,
        Box::new(driver),
        Box::new(notification_queue),
    ));

    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(tick_state, tick_rx).await;
    });

    let service = config.notification_service();
    tokio::spawn(async move {
        notification_task(service, Arc::new(StderrAlert), notification_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /timer/start     - Start the countdown");
    info!("  POST   /timer/stop      - Pause the countdown");
    info!("  POST   /timer/reset     - Reset to the work phase");
    info!("  GET    /timer           - Current timer and display");
    info!("  GET    /todos           - List tasks");
    info!("  POST   /todos           - Add a task");
    info!("  DELETE /todos/:id       - Remove a task");
    info!("  GET    /weather?city=   - Mock weather lookup");
    info!("  GET    /weather/current - Simulated current weather");
    info!("  GET    /status          - Service status");
    info!("  GET    /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.stop_timer() {
        tracing::warn!("Failed to stop timer during shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}

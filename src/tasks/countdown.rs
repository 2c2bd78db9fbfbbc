//! Countdown tick background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{state::AppState, timer::Tick};

/// Background task that applies driver ticks to the shared controller, one
/// at a time and in arrival order
pub async fn countdown_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<Tick>) {
    info!("Starting countdown task");

    while let Some(tick) = tick_rx.recv().await {
        match state.apply_tick(tick.generation) {
            Ok(true) => {
                debug!("Display: {}", state.get_display().text);
            }
            Ok(false) => {
                debug!("Tick for generation {} ignored", tick.generation);
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
            }
        }
    }

    info!("Tick channel closed, countdown task exiting");
}

//! Notification delivery background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::services::{deliver, AlertSink, Notification, NotificationService};

/// Background task that delivers queued notifications. Permission prompts
/// are awaited here so they never hold up the countdown.
pub async fn notification_task(
    service: Arc<dyn NotificationService>,
    alert: Arc<dyn AlertSink>,
    mut notification_rx: mpsc::UnboundedReceiver<Notification>,
) {
    info!("Starting notification task");

    while let Some(notification) = notification_rx.recv().await {
        let delivery = deliver(service.as_ref(), alert.as_ref(), &notification).await;
        debug!("Delivered '{}' via {:?}", notification.message, delivery);
    }

    info!("Notification queue closed, notification task exiting");
}

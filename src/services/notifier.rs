//! Notification services and delivery with an alert fallback

use std::sync::Mutex;
use futures::future::{self, BoxFuture, FutureExt};
use notify_rust::{Notification as DesktopNotification, Timeout};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Title used for every timer notification
pub const TIMER_TITLE: &str = "Pomodoro Timer";

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Notification carrying the timer title
    pub fn timer(message: impl Into<String>) -> Self {
        Self::new(TIMER_TITLE, message)
    }
}

/// Permission to show notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet; a request may still be granted
    Default,
    /// The platform has no notification support
    Unavailable,
}

/// Synchronous outlet the countdown controller emits into
pub trait NotificationSink: Send {
    fn emit(&self, notification: Notification);
}

/// Capability to show notifications, subject to a permission
pub trait NotificationService: Send + Sync {
    fn permission(&self) -> Permission;

    /// Ask the user for permission. Resolves once with their decision.
    fn request_permission(&self) -> BoxFuture<'_, Permission>;

    fn notify(&self, title: &str, message: &str) -> Result<(), String>;
}

/// Degraded path used when notifications cannot be shown
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// How a notification reached the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Notified,
    Alerted,
}

/// Deliver a notification, falling back to an alert when permission is
/// missing or the service fails
pub async fn deliver(
    service: &dyn NotificationService,
    alert: &dyn AlertSink,
    notification: &Notification,
) -> Delivery {
    let permission = match service.permission() {
        Permission::Default => {
            debug!("Requesting notification permission");
            service.request_permission().await
        }
        other => other,
    };

    if permission != Permission::Granted {
        debug!("Notification permission is {:?}, using alert", permission);
        alert.alert(&notification.message);
        return Delivery::Alerted;
    }

    match service.notify(&notification.title, &notification.message) {
        Ok(()) => Delivery::Notified,
        Err(e) => {
            warn!("Failed to show notification: {}", e);
            alert.alert(&notification.message);
            Delivery::Alerted
        }
    }
}

/// Sink that queues notifications for an async delivery task
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for NotificationQueue {
    fn emit(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!("Notification dropped, delivery task is gone: {}", e.0.message);
        }
    }
}

/// Desktop notifications through the platform notification daemon
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl NotificationService for DesktopNotifier {
    fn permission(&self) -> Permission {
        // Desktop daemons have no per-application permission prompt
        Permission::Granted
    }

    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        future::ready(Permission::Granted).boxed()
    }

    fn notify(&self, title: &str, message: &str) -> Result<(), String> {
        DesktopNotification::new()
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(5000))
            .show()
            .map_err(|e| format!("Failed to show desktop notification: {}", e))?;
        Ok(())
    }
}

/// Notifications written to the log only
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationService for LogNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        future::ready(Permission::Granted).boxed()
    }

    fn notify(&self, title: &str, message: &str) -> Result<(), String> {
        info!("[{}] {}", title, message);
        Ok(())
    }
}

/// Stand-in for a platform without notification support
#[derive(Debug, Default)]
pub struct DisabledNotifier;

impl NotificationService for DisabledNotifier {
    fn permission(&self) -> Permission {
        Permission::Unavailable
    }

    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        future::ready(Permission::Unavailable).boxed()
    }

    fn notify(&self, _title: &str, _message: &str) -> Result<(), String> {
        Err("Notifications are unavailable".to_string())
    }
}

/// Service with a scripted permission prompt; the first request settles the
/// decision for good
#[derive(Debug)]
pub struct PromptedNotifier<S> {
    inner: S,
    permission: Mutex<Permission>,
    answer: Permission,
}

impl<S: NotificationService> PromptedNotifier<S> {
    /// Wrap `inner`; a permission request will be answered with `answer`
    pub fn new(inner: S, answer: Permission) -> Self {
        Self {
            inner,
            permission: Mutex::new(Permission::Default),
            answer,
        }
    }
}

impl<S: NotificationService> NotificationService for PromptedNotifier<S> {
    fn permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Unavailable)
    }

    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        let decided = match self.permission.lock() {
            Ok(mut permission) => {
                if *permission == Permission::Default {
                    info!("Notification permission decided: {:?}", self.answer);
                    *permission = self.answer;
                }
                *permission
            }
            Err(_) => Permission::Unavailable,
        };
        future::ready(decided).boxed()
    }

    fn notify(&self, title: &str, message: &str) -> Result<(), String> {
        self.inner.notify(title, message)
    }
}

/// Alert fallback that writes straight to stderr
#[derive(Debug, Default)]
pub struct StderrAlert;

impl AlertSink for StderrAlert {
    fn alert(&self, message: &str) {
        warn!("Alert: {}", message);
        eprintln!("\x07{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Default)]
    struct RecordingAlert {
        messages: Mutex<Vec<String>>,
    }

    impl AlertSink for RecordingAlert {
        fn alert(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        shown: Arc<AtomicUsize>,
        fail: bool,
    }

    impl NotificationService for CountingNotifier {
        fn permission(&self) -> Permission {
            Permission::Granted
        }

        fn request_permission(&self) -> BoxFuture<'_, Permission> {
            future::ready(Permission::Granted).boxed()
        }

        fn notify(&self, _title: &str, _message: &str) -> Result<(), String> {
            if self.fail {
                return Err("daemon unreachable".to_string());
            }
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn granted_permission_notifies() {
        let alert = RecordingAlert::default();
        let service = CountingNotifier::default();
        let delivery = deliver(&service, &alert, &Notification::timer("Break Time!")).await;

        assert_eq!(delivery, Delivery::Notified);
        assert_eq!(service.shown.load(Ordering::SeqCst), 1);
        assert!(alert.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_service_falls_back_to_alert() {
        let alert = RecordingAlert::default();
        let delivery = deliver(&DisabledNotifier, &alert, &Notification::timer("Time's up!")).await;

        assert_eq!(delivery, Delivery::Alerted);
        assert_eq!(*alert.messages.lock().unwrap(), vec!["Time's up!".to_string()]);
    }

    #[tokio::test]
    async fn failing_service_falls_back_to_alert() {
        let alert = RecordingAlert::default();
        let service = CountingNotifier {
            fail: true,
            ..Default::default()
        };
        let delivery = deliver(&service, &alert, &Notification::timer("Work Time!")).await;

        assert_eq!(delivery, Delivery::Alerted);
        assert_eq!(alert.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecided_permission_is_requested_once() {
        let alert = RecordingAlert::default();
        let service = PromptedNotifier::new(CountingNotifier::default(), Permission::Granted);
        assert_eq!(service.permission(), Permission::Default);

        let first = deliver(&service, &alert, &Notification::timer("Break Time!")).await;
        assert_eq!(first, Delivery::Notified);
        assert_eq!(service.permission(), Permission::Granted);

        let second = deliver(&service, &alert, &Notification::timer("Work Time!")).await;
        assert_eq!(second, Delivery::Notified);
        assert_eq!(service.inner.shown.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn denied_request_alerts() {
        let alert = RecordingAlert::default();
        let service = PromptedNotifier::new(CountingNotifier::default(), Permission::Denied);

        let delivery = deliver(&service, &alert, &Notification::timer("Time's up!")).await;
        assert_eq!(delivery, Delivery::Alerted);
        assert_eq!(service.permission(), Permission::Denied);
        assert_eq!(service.inner.shown.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn queue_forwards_emitted_notifications() {
        let (queue, mut rx) = NotificationQueue::new();
        queue.emit(Notification::timer("Break Time!"));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, TIMER_TITLE);
        assert_eq!(received.message, "Break Time!");
    }
}

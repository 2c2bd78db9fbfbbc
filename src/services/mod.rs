//! External service module
//!
//! This module contains the notification services the timer reports through
//! and the mock weather data source.

pub mod notifier;
pub mod weather;

// Re-export main types
pub use notifier::{
    deliver, AlertSink, DesktopNotifier, DisabledNotifier, LogNotifier, Notification,
    NotificationQueue, NotificationService, NotificationSink, Permission, PromptedNotifier,
    StderrAlert,
};
pub use weather::{fetch_current, lookup, WeatherReport};

//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod notification_dispatch;

// Re-export main functions
pub use countdown::countdown_task;
pub use notification_dispatch::notification_task;

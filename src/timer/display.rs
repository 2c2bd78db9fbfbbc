//! Display surfaces the controller renders into

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

/// Default text color of a display surface
pub const DEFAULT_COLOR: &str = "#ffffff";

/// A minimal text surface: the controller only sets text and color
pub trait DisplaySink: Send {
    fn set_text(&self, text: &str);
    fn set_color(&self, color: &str);
}

/// Last rendered content of a display surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub text: String,
    pub color: String,
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Display backed by a watch channel so readers always see the latest frame
#[derive(Debug, Clone)]
pub struct WatchDisplay {
    frame_tx: watch::Sender<DisplayFrame>,
}

impl WatchDisplay {
    pub fn new() -> Self {
        let (frame_tx, _) = watch::channel(DisplayFrame::default());
        Self { frame_tx }
    }

    /// Current frame
    pub fn current(&self) -> DisplayFrame {
        self.frame_tx.borrow().clone()
    }

    /// Subscribe to frame updates
    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.frame_tx.subscribe()
    }

    fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut DisplayFrame) -> bool,
    {
        // Stores the value even when nobody is subscribed
        self.frame_tx.send_if_modified(updater);
    }
}

impl Default for WatchDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for WatchDisplay {
    fn set_text(&self, text: &str) {
        self.update(|frame| {
            if frame.text == text {
                return false;
            }
            frame.text = text.to_string();
            true
        });
    }

    fn set_color(&self, color: &str) {
        if color.is_empty() {
            warn!("Ignoring empty display color");
            return;
        }
        self.update(|frame| {
            if frame.color == color {
                return false;
            }
            frame.color = color.to_string();
            true
        });
    }
}

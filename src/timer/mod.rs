//! Countdown timer module
//!
//! The controller is a plain state machine; ticks, rendering and
//! notifications go through small capability traits so it can be driven by
//! tokio in production and by hand in tests.

pub mod controller;
pub mod display;
pub mod driver;

// Re-export main types
pub use controller::{CountdownController, TICK_PERIOD};
pub use display::{DisplayFrame, DisplaySink, WatchDisplay};
pub use driver::{ManualTickDriver, Tick, TickDriver, TokioTickDriver};

//! Tomato Clock - A state-managed HTTP service hosting a Pomodoro timer
//!
//! The core is a countdown controller that alternates work and break phases
//! (or runs a single countdown), renders `MM:SS` into a display surface and
//! notifies the user on every phase change. A to-do list and a mock weather
//! lookup are served alongside it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::CountdownController;
pub use utils::signals::shutdown_signal;

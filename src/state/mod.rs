//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod timer_state;
pub mod todo_list;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Durations, Phase, TimerMode, TimerSnapshot, TimerState};
pub use todo_list::{TodoError, TodoItem, TodoList};

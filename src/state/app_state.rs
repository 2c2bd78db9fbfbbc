//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{Durations, TimerMode, TimerSnapshot, TodoError, TodoItem, TodoList};
use crate::{
    services::{weather, NotificationSink, WeatherReport},
    timer::{CountdownController, DisplayFrame, DisplaySink, TickDriver, WatchDisplay},
};

/// Main application state that owns the countdown timer and the to-do list
#[derive(Debug)]
pub struct AppState {
    /// Countdown controller; all timer mutation goes through this lock
    pub controller: Arc<Mutex<CountdownController>>,
    /// Surface the controller renders into
    pub display: WatchDisplay,
    /// Surface the last weather lookup is rendered into
    pub weather_display: WatchDisplay,
    pub todos: Arc<Mutex<TodoList>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(
        port: u16,
        host: String,
        durations: Durations,
        mode: TimerMode,
        driver: Box<dyn TickDriver>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        let display = WatchDisplay::new();
        let controller =
            CountdownController::new(durations, mode, driver, Box::new(display.clone()), notifier);

        Self {
            controller: Arc::new(Mutex::new(controller)),
            display,
            weather_display: WatchDisplay::new(),
            todos: Arc::new(Mutex::new(TodoList::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `action` against the controller and record it as the last action
    pub fn update_timer<F, T>(&self, action: &str, action_fn: F) -> Result<T, String>
    where
        F: FnOnce(&mut CountdownController) -> T,
    {
        let mut controller = self
            .controller
            .lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let result = action_fn(&mut controller);
        drop(controller); // Release the lock early

        self.record_action(action);
        Ok(result)
    }

    /// Start the timer; returns whether a new driver was registered
    pub fn start_timer(&self) -> Result<(bool, TimerSnapshot), String> {
        self.update_timer("start", |c| (c.start(), c.snapshot()))
    }

    /// Pause the timer; returns whether it was running
    pub fn stop_timer(&self) -> Result<(bool, TimerSnapshot), String> {
        self.update_timer("stop", |c| (c.stop(), c.snapshot()))
    }

    pub fn reset_timer(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("reset", |c| {
            c.reset();
            c.snapshot()
        })
    }

    /// Apply a driver tick. Not recorded as a user action.
    pub fn apply_tick(&self, generation: u64) -> Result<bool, String> {
        let mut controller = self
            .controller
            .lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;
        Ok(controller.on_tick(generation))
    }

    /// Get current timer state
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.controller
            .lock()
            .map(|c| c.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Latest rendered display frame
    pub fn get_display(&self) -> DisplayFrame {
        self.display.current()
    }

    /// Look a city up and render the result, colored by outcome
    pub fn show_weather(&self, city: &str) -> (WeatherReport, DisplayFrame) {
        let report = weather::lookup(city);
        self.weather_display.set_text(&report.message);
        self.weather_display.set_color(&report.color);
        (report, self.weather_display.current())
    }

    /// Add a task; user input errors come back as [`TodoError`]
    pub fn add_todo(&self, text: &str) -> Result<Result<TodoItem, TodoError>, String> {
        let mut todos = self
            .todos
            .lock()
            .map_err(|e| format!("Failed to lock to-do list: {}", e))?;
        let result = todos.add(text);
        drop(todos);

        match &result {
            Ok(_) => self.record_action("todo-add"),
            Err(e) => debug!("Rejected task: {}", e),
        }
        Ok(result)
    }

    pub fn remove_todo(&self, id: u64) -> Result<Result<TodoItem, TodoError>, String> {
        let mut todos = self
            .todos
            .lock()
            .map_err(|e| format!("Failed to lock to-do list: {}", e))?;
        let result = todos.remove(id);
        drop(todos);

        if result.is_ok() {
            self.record_action("todo-remove");
        }
        Ok(result)
    }

    pub fn get_todos(&self) -> Result<Vec<TodoItem>, String> {
        self.todos
            .lock()
            .map(|todos| todos.list().to_vec())
            .map_err(|e| format!("Failed to lock to-do list: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

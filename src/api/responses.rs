//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::weather::{CurrentWeather, WeatherReport},
    state::{TimerSnapshot, TodoItem},
    timer::DisplayFrame,
};

/// API response structure for timer trigger endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    /// Create a new timer response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a running response
    pub fn running(message: String, timer: TimerSnapshot) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create an idle response
    pub fn idle(message: String, timer: TimerSnapshot) -> Self {
        Self::new("idle".to_string(), message, timer)
    }
}

/// Timer state together with what the display currently shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub timer: TimerSnapshot,
    pub display: DisplayFrame,
}

/// Response for to-do mutations and user input errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub status: String,
    pub message: String,
    pub item: Option<TodoItem>,
    pub items: Vec<TodoItem>,
}

impl TodoResponse {
    pub fn ok(message: String, item: Option<TodoItem>, items: Vec<TodoItem>) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            item,
            items,
        }
    }

    pub fn error(message: String, items: Vec<TodoItem>) -> Self {
        Self {
            status: "error".to_string(),
            message,
            item: None,
            items,
        }
    }
}

/// Request body for POST /todos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub text: String,
}

/// Query for GET /weather
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

/// Response for GET /weather
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub city: String,
    #[serde(flatten)]
    pub report: WeatherReport,
    pub display: DisplayFrame,
}

/// Response for GET /weather/current
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub title: String,
    #[serde(flatten)]
    pub weather: CurrentWeather,
}

/// Status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub display: DisplayFrame,
    pub todo_count: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

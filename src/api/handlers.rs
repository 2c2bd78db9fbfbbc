//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    services::weather::{self, FETCH_DELAY},
    state::{AppState, TodoError},
};
use super::responses::{
    CurrentWeatherResponse, HealthResponse, NewTodo, StatusResponse, TimerResponse, TimerView,
    TodoResponse, WeatherQuery, WeatherResponse,
};

/// Handle POST /timer/start - Start the countdown
pub async fn timer_start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, StatusCode> {
    match state.start_timer() {
        Ok((true, timer)) => {
            info!("Start endpoint called - timer started");
            Ok(Json(TimerResponse::running("Timer started".to_string(), timer)))
        }
        Ok((false, timer)) => Ok(Json(TimerResponse::running(
            "Timer already running".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/stop - Pause the countdown
pub async fn timer_stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, StatusCode> {
    match state.stop_timer() {
        Ok((stopped, timer)) => {
            let message = if stopped {
                info!("Stop endpoint called - timer paused");
                "Timer stopped"
            } else {
                "Timer was not running"
            };
            Ok(Json(TimerResponse::idle(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to stop timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/reset - Cancel the countdown and restore the work phase
pub async fn timer_reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, StatusCode> {
    match state.reset_timer() {
        Ok(timer) => {
            info!("Reset endpoint called - timer reset");
            Ok(Json(TimerResponse::idle("Timer reset".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Current timer and display
pub async fn timer_view_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerView>, StatusCode> {
    let timer = state.get_timer_snapshot().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(TimerView {
        timer,
        display: state.get_display(),
    }))
}

/// Handle GET /todos - List tasks
pub async fn todo_list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TodoResponse>, StatusCode> {
    let items = state.get_todos().map_err(|e| {
        error!("Failed to list tasks: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(TodoResponse::ok(
        format!("{} task(s)", items.len()),
        None,
        items,
    )))
}

/// Handle POST /todos - Add a task
pub async fn todo_add_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTodo>,
) -> Result<(StatusCode, Json<TodoResponse>), StatusCode> {
    let result = state.add_todo(&body.text).map_err(|e| {
        error!("Failed to add task: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let items = state.get_todos().map_err(|e| {
        error!("Failed to list tasks: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match result {
        Ok(item) => Ok((
            StatusCode::CREATED,
            Json(TodoResponse::ok("Task added".to_string(), Some(item), items)),
        )),
        Err(e) => Ok((
            todo_error_status(&e),
            Json(TodoResponse::error(e.to_string(), items)),
        )),
    }
}

/// Handle DELETE /todos/:id - Remove a task
pub async fn todo_remove_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, Json<TodoResponse>), StatusCode> {
    let result = state.remove_todo(id).map_err(|e| {
        error!("Failed to remove task: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let items = state.get_todos().map_err(|e| {
        error!("Failed to list tasks: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match result {
        Ok(item) => Ok((
            StatusCode::OK,
            Json(TodoResponse::ok("Task removed".to_string(), Some(item), items)),
        )),
        Err(e) => Ok((
            todo_error_status(&e),
            Json(TodoResponse::error(e.to_string(), items)),
        )),
    }
}

fn todo_error_status(error: &TodoError) -> StatusCode {
    match error {
        TodoError::EmptyText => StatusCode::BAD_REQUEST,
        TodoError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// Handle GET /weather?city= - Mock lookup
pub async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let (report, display) = state.show_weather(&query.city);
    Json(WeatherResponse {
        city: query.city.trim().to_string(),
        report,
        display,
    })
}

/// Handle GET /weather/current - Simulated remote fetch
pub async fn current_weather_handler() -> Json<CurrentWeatherResponse> {
    let weather = weather::fetch_current(FETCH_DELAY).await;
    Json(CurrentWeatherResponse {
        title: "Current Weather".to_string(),
        weather,
    })
}

/// Handle GET /status - Return current service status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let todo_count = match state.get_todos() {
        Ok(items) => items.len(),
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        display: state.get_display(),
        todo_count,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

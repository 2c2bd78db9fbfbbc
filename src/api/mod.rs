//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(timer_view_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/stop", post(timer_stop_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/todos", get(todo_list_handler).post(todo_add_handler))
        .route("/todos/:id", delete(todo_remove_handler))
        .route("/weather", get(weather_handler))
        .route("/weather/current", get(current_weather_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

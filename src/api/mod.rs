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
        .route("/timer", get(timer_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/mode", post(mode_handler))
        .route("/timer/events", get(timer_events_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/stats", get(stats_handler))
        .route("/tasks", get(list_tasks_handler).post(add_task_handler))
        .route("/tasks/:id/toggle", post(toggle_task_handler))
        .route("/tasks/:id", delete(remove_task_handler))
        .route("/chart/weekly", get(weekly_chart_handler))
        .route("/calendar", get(calendar_handler))
        .route("/settings", get(get_settings_handler).put(update_settings_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

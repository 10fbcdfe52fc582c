//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::{Datelike, Local};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    error::Result,
    state::{AppState, SessionCompleted, SessionMode, Settings, SettingsUpdate, Task, TimerSnapshot},
    views::{month_grid, weekly_chart, CalendarMonth, WeeklyChart},
};
use super::responses::{
    AddTaskRequest, CalendarQuery, DashboardResponse, HealthResponse, ModeRequest,
    StatsResponse, StatusResponse, TimerResponse,
};

fn today_index() -> usize {
    Local::now().weekday().num_days_from_monday() as usize
}

/// Handle GET /timer - Current countdown and session counter
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.get_timer()?;
    let sessions = state.get_session_progress()?;
    Ok(Json(TimerResponse::new(
        format!("Session {} of {}", sessions.0, sessions.1),
        timer,
        sessions,
    )))
}

/// Handle POST /timer/toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.toggle_running()?;
    let sessions = state.get_session_progress()?;
    let message = if timer.running { "Timer started" } else { "Timer paused" };
    info!("Toggle endpoint called - {}", message.to_lowercase());
    Ok(Json(TimerResponse::new(message.to_string(), timer, sessions)))
}

/// Handle POST /timer/mode - Switch between focus and breaks
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<TimerResponse>> {
    let Json(request) = request?;
    let mode: SessionMode = request.mode.parse()?;
    let timer = state.set_mode(mode)?;
    let sessions = state.get_session_progress()?;
    Ok(Json(TimerResponse::new(
        format!("{} mode selected", mode.label()),
        timer,
        sessions,
    )))
}

/// Handle GET /timer/events - Stream timer snapshots and completions
pub async fn timer_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut timer_rx = state.timer_update_tx.subscribe();
    let initial = timer_rx.borrow_and_update().clone();

    let timer_updates = stream::once(async move { timer_event(&initial) }).chain(stream::unfold(
        timer_rx,
        |mut rx| async move {
            rx.changed().await.ok()?;
            let snapshot = rx.borrow_and_update().clone();
            Some((timer_event(&snapshot), rx))
        },
    ));

    let completions = stream::unfold(state.completion_tx.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(completed) => return Some((completion_event(&completed), rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} completions", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream::select(timer_updates, completions)).keep_alive(KeepAlive::default())
}

fn timer_event(snapshot: &TimerSnapshot) -> std::result::Result<Event, Infallible> {
    Ok(Event::default().event("timer").json_data(snapshot).unwrap_or_else(|e| {
        warn!("Failed to encode timer event: {}", e);
        Event::default().event("timer")
    }))
}

fn completion_event(completed: &SessionCompleted) -> std::result::Result<Event, Infallible> {
    Ok(Event::default().event("complete").json_data(completed).unwrap_or_else(|e| {
        warn!("Failed to encode completion event: {}", e);
        Event::default().event("complete")
    }))
}

/// Handle GET /dashboard - Everything the front end renders
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let timer = state.get_timer()?;
    let dashboard = state.get_dashboard()?;

    Ok(Json(DashboardResponse {
        timer,
        current_session: dashboard.current_session,
        total_sessions: dashboard.total_sessions,
        stats: StatsResponse::from(&dashboard.stats),
        chart: weekly_chart(&dashboard.weekly, today_index()),
        tasks: dashboard.tasks,
        settings: dashboard.settings,
    }))
}

/// Handle GET /stats - Daily stats panel
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let dashboard = state.get_dashboard()?;
    Ok(Json(StatsResponse::from(&dashboard.stats)))
}

/// Handle GET /tasks - Today's tasks
pub async fn list_tasks_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.get_dashboard()?.tasks))
}

/// Handle POST /tasks - Add a task
pub async fn add_task_handler(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<AddTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>)> {
    let Json(request) = request?;
    let task = state.add_task(&request.title, request.points)?;
    info!("Task {} added: {}", task.id, task.title);
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handle POST /tasks/:id/toggle - Flip task completion
pub async fn toggle_task_handler(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Task>> {
    let Path(id) = id?;
    Ok(Json(state.toggle_task(id)?))
}

/// Handle DELETE /tasks/:id - Remove a task
pub async fn remove_task_handler(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Task>> {
    let Path(id) = id?;
    Ok(Json(state.remove_task(id)?))
}

/// Handle GET /chart/weekly - Weekly progress chart
pub async fn weekly_chart_handler(State(state): State<Arc<AppState>>) -> Result<Json<WeeklyChart>> {
    let dashboard = state.get_dashboard()?;
    Ok(Json(weekly_chart(&dashboard.weekly, today_index())))
}

/// Handle GET /calendar - Month grid, defaults to the current month
pub async fn calendar_handler(
    query: std::result::Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarMonth>> {
    let Query(query) = query?;
    let today = Local::now().date_naive();
    let grid = month_grid(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month()),
        today,
    )?;
    Ok(Json(grid))
}

/// Handle GET /settings - Quick settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Result<Json<Settings>> {
    Ok(Json(state.get_dashboard()?.settings))
}

/// Handle PUT /settings - Update quick settings
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    update: std::result::Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<Settings>> {
    let Json(update) = update?;
    Ok(Json(state.update_settings(update)?))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>> {
    let timer = state.get_timer()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer_running: timer.running,
        timer_remaining_seconds: timer.remaining_seconds,
        ticker_active: state.countdown_active(),
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

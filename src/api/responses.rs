//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{DailyStats, Settings, Task, TimerSnapshot},
    views::WeeklyChart,
};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub current_session: u32,
    pub total_sessions: u32,
}

impl TimerResponse {
    /// Create a new timer response, status derived from the running flag
    pub fn new(message: String, timer: TimerSnapshot, sessions: (u32, u32)) -> Self {
        Self {
            status: (if timer.running { "running" } else { "paused" }).to_string(),
            message,
            timestamp: Utc::now(),
            timer,
            current_session: sessions.0,
            total_sessions: sessions.1,
        }
    }
}

/// Daily stats panel with preformatted focus time
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub focus_time: String,
    pub focus_minutes: u32,
    pub completed_sessions: u32,
    pub daily_streak: u32,
    pub total_points: u32,
}

impl From<&DailyStats> for StatsResponse {
    fn from(stats: &DailyStats) -> Self {
        Self {
            focus_time: stats.focus_time(),
            focus_minutes: stats.focus_minutes,
            completed_sessions: stats.completed_sessions,
            daily_streak: stats.daily_streak,
            total_points: stats.total_points,
        }
    }
}

/// Everything needed to render the dashboard in one request
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub timer: TimerSnapshot,
    pub current_session: u32,
    pub total_sessions: u32,
    pub stats: StatsResponse,
    pub tasks: Vec<Task>,
    pub chart: WeeklyChart,
    pub settings: Settings,
}

/// Server status response with timer information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer_running: bool,
    pub timer_remaining_seconds: u64,
    pub ticker_active: bool,
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

/// Body of POST /timer/mode
#[derive(Debug, Clone, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

/// Body of POST /tasks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTaskRequest {
    #[serde(default)]
    pub title: String,
    pub points: Option<u32>,
}

/// Query of GET /calendar
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

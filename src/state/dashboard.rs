//! Dashboard aggregate: daily statistics, task list and weekly session counts

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use super::SessionMode;

/// Minutes credited for each completed focus session
pub const FOCUS_MINUTES_PER_SESSION: u32 = 25;
/// Ceiling for a single day's bar in the weekly chart
pub const WEEKLY_SESSION_CAP: u32 = 8;

const DEFAULT_TASK_TITLE: &str = "New Task";
const DEFAULT_TASK_POINTS: u32 = 10;

/// Daily statistics panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub focus_minutes: u32,
    pub completed_sessions: u32,
    pub daily_streak: u32,
    pub total_points: u32,
}

impl DailyStats {
    /// Focus time rendered as "Xh Ym"
    pub fn focus_time(&self) -> String {
        format_focus_time(self.focus_minutes)
    }
}

/// A task on today's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub points: u32,
}

/// Quick settings toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound: bool,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            notifications: false,
        }
    }
}

/// Everything the dashboard shows besides the timer itself
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: DailyStats,
    pub tasks: Vec<Task>,
    /// Sessions per weekday, Monday first
    pub weekly: [u32; 7],
    pub current_session: u32,
    pub total_sessions: u32,
    pub settings: Settings,
    next_task_id: u64,
}

impl Dashboard {
    /// Create an empty dashboard planning `total_sessions` focus sessions
    pub fn new(total_sessions: u32) -> Self {
        Self {
            stats: DailyStats::default(),
            tasks: Vec::new(),
            weekly: [0; 7],
            current_session: 1,
            total_sessions,
            settings: Settings::default(),
            next_task_id: 1,
        }
    }

    /// Create a dashboard preloaded with starter tasks and a week of history
    pub fn with_sample_data(total_sessions: u32) -> Self {
        let mut dashboard = Self::new(total_sessions);
        dashboard.stats = DailyStats {
            focus_minutes: 205,
            completed_sessions: 4,
            daily_streak: 5,
            total_points: 0,
        };
        dashboard.weekly = [3, 5, 2, 6, 4, 3, 1];
        for (title, points) in [
            ("Complete project proposal", 25),
            ("Review team presentations", 15),
            ("Update documentation", 20),
            ("Team sync meeting", 10),
        ] {
            dashboard.add_task(title, Some(points));
        }
        dashboard
    }

    /// Credit a finished countdown; only focus sessions count toward stats
    ///
    /// `weekday_index` is Monday-first (0 = Monday). Returns whether any
    /// statistic changed.
    pub fn record_completion(&mut self, mode: SessionMode, weekday_index: usize) -> bool {
        if mode != SessionMode::Focus {
            debug!("{} completed, statistics unchanged", mode.label());
            return false;
        }

        self.stats.focus_minutes += FOCUS_MINUTES_PER_SESSION;
        self.stats.completed_sessions += 1;
        self.current_session += 1;

        if let Some(bucket) = self.weekly.get_mut(weekday_index) {
            *bucket = (*bucket + 1).min(WEEKLY_SESSION_CAP);
        }

        info!(
            "Focus session recorded: {} sessions, {} today",
            self.stats.completed_sessions,
            self.stats.focus_time()
        );
        true
    }

    /// Append a task; blank titles and missing points fall back to defaults
    pub fn add_task(&mut self, title: &str, points: Option<u32>) -> Task {
        let title = title.trim();
        let task = Task {
            id: self.next_task_id,
            title: (if title.is_empty() { DEFAULT_TASK_TITLE } else { title }).to_string(),
            completed: false,
            points: points.unwrap_or(DEFAULT_TASK_POINTS),
        };
        self.next_task_id += 1;
        self.tasks.push(task.clone());
        debug!("Added task {}: {}", task.id, task.title);
        task
    }

    /// Flip a task's completion and adjust the points total
    pub fn toggle_task(&mut self, id: u64) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(DashboardError::TaskNotFound(id))?;

        task.completed = !task.completed;
        if task.completed {
            self.stats.total_points = self.stats.total_points.saturating_add(task.points);
        } else {
            self.stats.total_points = self.stats.total_points.saturating_sub(task.points);
        }

        debug!("Task {} completed={}", task.id, task.completed);
        Ok(task.clone())
    }

    /// Delete a task; points already earned are kept
    pub fn remove_task(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(DashboardError::TaskNotFound(id))?;
        Ok(self.tasks.remove(index))
    }
}

/// Format minutes as "Xh Ym"
pub fn format_focus_time(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

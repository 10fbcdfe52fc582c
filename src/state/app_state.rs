//! Main application state management

use std::{
    sync::{Arc, Mutex, Weak},
    time::Instant,
};
use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::{DashboardError, Result},
    services::send_completion_notification,
    tasks::Countdown,
};
use super::{Dashboard, SessionMode, Settings, Task, TimerSnapshot, TimerState};

/// Broadcast when a countdown reaches zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCompleted {
    pub mode: SessionMode,
    pub completed_at: DateTime<Utc>,
}

/// Main application state shared by the HTTP handlers and the countdown ticker
#[derive(Debug)]
pub struct AppState {
    /// Countdown state machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Stats, tasks, weekly chart data and settings
    pub dashboard: Arc<Mutex<Dashboard>>,
    /// Tick task for the running timer; locked before `timer_state`
    countdown: Mutex<Countdown>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    /// Channel for completion notifications
    pub completion_tx: broadcast::Sender<SessionCompleted>,
}

impl AppState {
    /// Create an AppState around an existing dashboard
    pub fn new(port: u16, host: String, initial_time: u64, dashboard: Dashboard) -> Self {
        let timer = TimerState::new(initial_time);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.snapshot());
        let (completion_tx, _) = broadcast::channel(16);

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            dashboard: Arc::new(Mutex::new(dashboard)),
            countdown: Mutex::new(Countdown::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            completion_tx,
        }
    }

    fn lock_timer(&self) -> Result<std::sync::MutexGuard<'_, TimerState>> {
        self.timer_state.lock().map_err(|_| DashboardError::LockPoisoned("timer"))
    }

    fn lock_dashboard(&self) -> Result<std::sync::MutexGuard<'_, Dashboard>> {
        self.dashboard.lock().map_err(|_| DashboardError::LockPoisoned("dashboard"))
    }

    fn lock_countdown(&self) -> Result<std::sync::MutexGuard<'_, Countdown>> {
        self.countdown.lock().map_err(|_| DashboardError::LockPoisoned("countdown"))
    }

    /// Start or pause the countdown, spawning or cancelling the ticker
    pub fn toggle_running(self: &Arc<Self>) -> Result<TimerSnapshot> {
        let mut countdown = self.lock_countdown()?;

        let (running, epoch, snapshot) = {
            let mut timer = self.lock_timer()?;
            let running = timer.toggle_running();
            (running, timer.epoch(), timer.snapshot())
        };

        if running {
            let tick_state = Arc::downgrade(self);
            let complete_state = Arc::downgrade(self);
            countdown.start(
                Arc::clone(&self.timer_state),
                epoch,
                move |snapshot| {
                    if let Some(state) = tick_state.upgrade() {
                        state.publish_timer(snapshot.clone());
                    }
                },
                move |mode| on_countdown_complete(complete_state, mode),
            );
        } else {
            countdown.cancel();
        }
        drop(countdown);

        info!("Timer {} at {}", if running { "started" } else { "paused" }, snapshot.display);
        self.record_action(if running { "start" } else { "pause" });
        self.publish_timer(snapshot.clone());
        Ok(snapshot)
    }

    /// Switch session mode; always stops the countdown
    pub fn set_mode(&self, mode: SessionMode) -> Result<TimerSnapshot> {
        let mut countdown = self.lock_countdown()?;

        let snapshot = {
            let mut timer = self.lock_timer()?;
            timer.set_mode(mode);
            timer.snapshot()
        };
        countdown.cancel();
        drop(countdown);

        info!("Mode set to {} ({})", mode, snapshot.display);
        self.record_action(&format!("mode:{}", mode));
        self.publish_timer(snapshot.clone());
        Ok(snapshot)
    }

    /// Credit a finished countdown of `mode` to the dashboard and notify subscribers
    ///
    /// This is the completion callback handed to the ticker. The mode comes
    /// from the completing tick, not the current timer, which may already
    /// have been switched.
    pub fn handle_session_complete(&self, mode: SessionMode) -> Result<()> {
        let weekday = Local::now().weekday().num_days_from_monday() as usize;

        let notify = {
            let mut dashboard = self.lock_dashboard()?;
            dashboard.record_completion(mode, weekday);
            dashboard.settings.notifications
        };

        self.record_action(&format!("complete:{}", mode));

        let event = SessionCompleted {
            mode,
            completed_at: Utc::now(),
        };
        // No subscribers is the normal case
        if self.completion_tx.send(event).is_err() {
            debug!("No completion subscribers");
        }

        if notify {
            tokio::spawn(async move {
                if let Err(e) = send_completion_notification(mode).await {
                    warn!("Failed to send completion notification: {}", e);
                }
            });
        }

        Ok(())
    }

    /// Cancel the ticker; called on shutdown
    pub fn shutdown(&self) {
        match self.countdown.lock() {
            Ok(mut countdown) => countdown.cancel(),
            Err(e) => warn!("Failed to lock countdown during shutdown: {}", e),
        }
    }

    /// Whether a tick task is currently alive
    pub fn countdown_active(&self) -> bool {
        self.countdown.lock().map(|c| c.is_active()).unwrap_or(false)
    }

    fn publish_timer(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Get current timer snapshot
    pub fn get_timer(&self) -> Result<TimerSnapshot> {
        Ok(self.lock_timer()?.snapshot())
    }

    /// Get a copy of the dashboard
    pub fn get_dashboard(&self) -> Result<Dashboard> {
        Ok(self.lock_dashboard()?.clone())
    }

    /// Session counters shown under the timer
    pub fn get_session_progress(&self) -> Result<(u32, u32)> {
        let dashboard = self.lock_dashboard()?;
        Ok((dashboard.current_session, dashboard.total_sessions))
    }

    pub fn add_task(&self, title: &str, points: Option<u32>) -> Result<Task> {
        let task = self.lock_dashboard()?.add_task(title, points);
        self.record_action("add-task");
        Ok(task)
    }

    pub fn toggle_task(&self, id: u64) -> Result<Task> {
        let task = self.lock_dashboard()?.toggle_task(id)?;
        self.record_action("toggle-task");
        Ok(task)
    }

    pub fn remove_task(&self, id: u64) -> Result<Task> {
        let task = self.lock_dashboard()?.remove_task(id)?;
        self.record_action("remove-task");
        Ok(task)
    }

    /// Apply partial settings changes
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let mut dashboard = self.lock_dashboard()?;
        if let Some(sound) = update.sound {
            dashboard.settings.sound = sound;
        }
        if let Some(notifications) = update.notifications {
            dashboard.settings.notifications = notifications;
        }
        let settings = dashboard.settings;
        drop(dashboard);

        info!("Settings updated: sound={}, notifications={}", settings.sound, settings.notifications);
        self.record_action("settings");
        Ok(settings)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
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
}

/// Partial settings update; absent fields are left unchanged
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SettingsUpdate {
    pub sound: Option<bool>,
    pub notifications: Option<bool>,
}

fn on_countdown_complete(state: Weak<AppState>, mode: SessionMode) {
    let Some(state) = state.upgrade() else {
        debug!("Application state dropped before completion");
        return;
    };
    if let Err(e) = state.handle_session_complete(mode) {
        warn!("Failed to record session completion: {}", e);
    }
}

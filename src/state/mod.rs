//! State management module
//! 
//! This module contains the timer state machine, the dashboard aggregate and
//! the shared application state that ties them to the countdown ticker.

pub mod session_mode;
pub mod timer_state;
pub mod dashboard;
pub mod app_state;

// Re-export main types
pub use session_mode::SessionMode;
pub use timer_state::{format_clock, TickOutcome, TimerPhase, TimerSnapshot, TimerState};
pub use dashboard::{format_focus_time, DailyStats, Dashboard, Settings, Task};
pub use app_state::{AppState, SessionCompleted, SettingsUpdate};

//! Focus Flow - A state-managed HTTP server for a Pomodoro focus dashboard
//! 
//! This library provides the session timer state machine, its cancellable
//! countdown ticker, and the dashboard aggregate (stats, tasks, weekly chart,
//! calendar) served over a JSON API.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use error::DashboardError;
pub use state::{AppState, Dashboard, SessionMode, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

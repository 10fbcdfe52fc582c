//! Presentational views computed for the dashboard front end

pub mod calendar;
pub mod chart;

pub use calendar::{month_grid, CalendarDay, CalendarMonth};
pub use chart::{weekly_chart, ChartBar, WeeklyChart};

//! Month calendar grid

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{DashboardError, Result};

/// Weekday column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekday_headers: [&'static str; 7],
    /// Empty cells before the 1st
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Build the grid for `year`-`month`, marking `today` if it falls inside
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Result<CalendarMonth> {
    let invalid = || DashboardError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    let days_in_month = (next_first - first).num_days() as u32;
    let is_current_month = today.year() == year && today.month() == month;

    let days = (1..=days_in_month)
        .map(|day| CalendarDay {
            day,
            is_today: is_current_month && today.day() == day,
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        title: first.format("%B %Y").to_string(),
        weekday_headers: WEEKDAY_HEADERS,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lays_out_leap_february() {
        let grid = month_grid(2024, 2, date(2024, 2, 14)).unwrap();
        assert_eq!(grid.title, "February 2024");
        assert_eq!(grid.days.len(), 29);
        // 2024-02-01 was a Thursday
        assert_eq!(grid.leading_blanks, 4);
        let today: Vec<_> = grid.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day, 14);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let grid = month_grid(2023, 12, date(2024, 1, 1)).unwrap();
        assert_eq!(grid.days.len(), 31);
        assert!(grid.days.iter().all(|d| !d.is_today));
        // 2023-12-01 was a Friday
        assert_eq!(grid.leading_blanks, 5);
    }

    #[test]
    fn month_starting_sunday_has_no_blanks() {
        // 2024-09-01 was a Sunday
        let grid = month_grid(2024, 9, date(2024, 9, 30)).unwrap();
        assert_eq!(grid.leading_blanks, 0);
        assert_eq!(grid.days.len(), 30);
        assert!(grid.days[29].is_today);
    }

    #[test]
    fn rejects_invalid_month() {
        let today = date(2024, 1, 1);
        assert!(matches!(
            month_grid(2024, 13, today),
            Err(DashboardError::InvalidMonth { year: 2024, month: 13 })
        ));
        assert!(month_grid(2024, 0, today).is_err());
    }
}

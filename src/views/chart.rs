//! Weekly progress bar chart layout

use serde::Serialize;

/// Day labels, Monday first
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Smallest top of scale so a quiet week doesn't render full-height bars
pub const MIN_SCALE: u32 = 8;

/// Bars never shrink below this height so empty days stay visible
pub const MIN_BAR_PERCENT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub day: &'static str,
    pub value: u32,
    pub height_percent: f64,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyChart {
    pub scale_max: u32,
    pub bars: Vec<ChartBar>,
}

/// Lay out the week's session counts; `today_index` is Monday-first
pub fn weekly_chart(values: &[u32; 7], today_index: usize) -> WeeklyChart {
    let scale_max = values.iter().copied().max().unwrap_or(0).max(MIN_SCALE);

    let bars = values
        .iter()
        .zip(DAY_LABELS)
        .enumerate()
        .map(|(index, (&value, day))| ChartBar {
            day,
            value,
            height_percent: (f64::from(value) / f64::from(scale_max) * 100.0).max(MIN_BAR_PERCENT),
            is_today: index == today_index,
        })
        .collect();

    WeeklyChart { scale_max, bars }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_has_a_floor() {
        let chart = weekly_chart(&[3, 5, 2, 6, 4, 3, 1], 0);
        assert_eq!(chart.scale_max, 8);
        assert_eq!(chart.bars[3].height_percent, 75.0);
        assert_eq!(chart.bars[0].day, "Mon");
        assert!(chart.bars[0].is_today);
        assert_eq!(chart.bars.iter().filter(|bar| bar.is_today).count(), 1);
    }

    #[test]
    fn empty_days_keep_minimum_height() {
        let chart = weekly_chart(&[0; 7], 6);
        assert!(chart.bars.iter().all(|bar| bar.height_percent == MIN_BAR_PERCENT));
        assert!(chart.bars[6].is_today);
        assert_eq!(chart.bars[6].day, "Sun");
    }

    #[test]
    fn busiest_day_sets_scale_above_floor() {
        let chart = weekly_chart(&[10, 5, 0, 0, 0, 0, 0], 2);
        assert_eq!(chart.scale_max, 10);
        assert_eq!(chart.bars[0].height_percent, 100.0);
        assert_eq!(chart.bars[1].height_percent, 50.0);
    }
}

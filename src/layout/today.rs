use chrono::{Datelike, NaiveDate};

use crate::calendar;

use super::window::ViewWindow;

/// Horizontal position of the "today" line as a percentage of the board width,
/// or `None` when `today` is outside the window.
pub fn today_marker(window: &ViewWindow, today: NaiveDate) -> Option<f64> {
    if !window.contains(today) {
        return None;
    }
    let column_count = window.column_count();
    if column_count == 0 {
        return None;
    }

    let position = if window.granularity.is_day_based() {
        let day_index = calendar::days_between(window.start, today) as f64;
        (day_index + 0.5) / column_count as f64 * 100.0
    } else {
        let month_index = f64::from(today.month0());
        let month_fraction = f64::from(today.day()) / f64::from(calendar::days_in_month(today));
        (month_index + month_fraction) / 12.0 * 100.0
    };

    position.is_finite().then(|| position.clamp(0.0, 100.0))
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar;
use crate::error::{LayoutError, ParseError};

/// Zoom level of the planning board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Week and month windows have one column per day; the year window has one per month.
    pub fn is_day_based(&self) -> bool {
        !matches!(self, Granularity::Year)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(ParseError::UnknownGranularity(value.to_string())),
        }
    }
}

/// Header cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKey {
    Day { date: NaiveDate },
    Month { year: i32, month: u32 },
}

impl ColumnKey {
    pub fn label(&self) -> String {
        match self {
            ColumnKey::Day { date } => date.format("%a %d").to_string(),
            ColumnKey::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .map(|first| first.format("%b").to_string())
                .unwrap_or_else(|| format!("{month:02}")),
        }
    }
}

/// Visible time range plus its column list. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewWindow {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub columns: Vec<ColumnKey>,
}

impl ViewWindow {
    /// Window of the given granularity containing `reference`. Fails only for
    /// weeks that straddle the ends of chrono's date range.
    pub fn resolve(reference: NaiveDate, granularity: Granularity) -> Result<Self, LayoutError> {
        let out_of_range = LayoutError::DateOutOfRange {
            date: reference,
            granularity,
        };
        let (start, end) = match granularity {
            Granularity::Week => match (calendar::week_start(reference), calendar::week_end(reference)) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(out_of_range),
            },
            Granularity::Month => (
                calendar::first_day_of_month(reference),
                calendar::last_day_of_month(reference),
            ),
            Granularity::Year => (
                calendar::first_day_of_year(reference),
                calendar::last_day_of_year(reference),
            ),
        };

        let columns = if granularity.is_day_based() {
            calendar::days_in_range(start, end)
                .into_iter()
                .map(|date| ColumnKey::Day { date })
                .collect()
        } else {
            (1..=12)
                .map(|month| ColumnKey::Month {
                    year: start.year(),
                    month,
                })
                .collect()
        };

        tracing::trace!(%granularity, %start, %end, "resolved view window");
        Ok(Self {
            granularity,
            start,
            end,
            columns,
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Column index holding `date`, or `None` outside the window.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        let offset = if self.granularity.is_day_based() {
            calendar::days_between(self.start, date)
        } else {
            calendar::months_between(self.start, date)
        };
        usize::try_from(offset).ok()
    }

    /// Window one unit later.
    pub fn next(&self) -> Result<Self, LayoutError> {
        self.shifted(1)
    }

    /// Window one unit earlier.
    pub fn prev(&self) -> Result<Self, LayoutError> {
        self.shifted(-1)
    }

    fn shifted(&self, steps: i32) -> Result<Self, LayoutError> {
        let reference = shift_reference(self.start, self.granularity, steps).ok_or(
            LayoutError::DateOutOfRange {
                date: self.start,
                granularity: self.granularity,
            },
        )?;
        Self::resolve(reference, self.granularity)
    }
}

/// Move a reference date by `steps` weeks, months or years. `None` when the
/// result leaves chrono's date range.
pub fn shift_reference(
    reference: NaiveDate,
    granularity: Granularity,
    steps: i32,
) -> Option<NaiveDate> {
    match granularity {
        Granularity::Week => calendar::shift_weeks(reference, steps),
        Granularity::Month => calendar::shift_months(reference, steps),
        Granularity::Year => calendar::shift_months(reference, steps.saturating_mul(12)),
    }
}

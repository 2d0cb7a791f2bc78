use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Lifecycle status of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Draft,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Draft,
        BookingStatus::Planned,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Draft => "draft",
            BookingStatus::Planned => "planned",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseError::UnknownStatus(value.to_string()))
    }
}

/// A single session as handed over by the data store. Never mutated by the
/// layout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Course name shown on the bar and in the tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: BookingStatus,
    ) -> Self {
        Self {
            id: id.into(),
            resource_id: None,
            title: None,
            start_date: Some(start_date),
            end_date: Some(end_date),
            start_time: None,
            end_time: None,
            status,
        }
    }

    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Inclusive date range used for layout, or `None` when neither date is
    /// known. A single known date stands in for the missing one, and an end
    /// before the start collapses onto the start day.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            (Some(day), None) | (None, Some(day)) => (day, day),
            (None, None) => return None,
        };
        Some((start, end.max(start)))
    }

    /// True when the stored end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if end < start)
    }
}

/// Set of statuses currently enabled for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusFilter(BTreeSet<BookingStatus>);

impl StatusFilter {
    pub fn all() -> Self {
        Self(BookingStatus::ALL.into_iter().collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn allows(&self, status: BookingStatus) -> bool {
        self.0.contains(&status)
    }

    pub fn enable(&mut self, status: BookingStatus) {
        self.0.insert(status);
    }

    pub fn disable(&mut self, status: BookingStatus) {
        self.0.remove(&status);
    }

    /// Flip a status and return whether it is now enabled.
    pub fn toggle(&mut self, status: BookingStatus) -> bool {
        if self.0.remove(&status) {
            false
        } else {
            self.0.insert(status);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = BookingStatus> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StatusFilter {
    /// Everything except cancelled sessions.
    fn default() -> Self {
        BookingStatus::ALL
            .into_iter()
            .filter(|status| *status != BookingStatus::Cancelled)
            .collect()
    }
}

impl FromIterator<BookingStatus> for StatusFilter {
    fn from_iter<I: IntoIterator<Item = BookingStatus>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    /// Comma separated list, e.g. `planned,in_progress`. `all` enables every status.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(BookingStatus::from_str)
            .collect()
    }
}

/// Parse an `HH:MM` clock time.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(input.trim(), hhmm::FORMAT)
        .map_err(|_| ParseError::InvalidTime(input.to_string()))
}

/// Serde helper for optional `HH:MM` times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

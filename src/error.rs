use chrono::NaiveDate;
use std::fmt;

use crate::layout::Granularity;

/// Failure to interpret a user-supplied token (status, granularity, time, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownStatus(String),
    UnknownGranularity(String),
    InvalidTime(String),
    InvalidDate(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownStatus(value) => write!(
                f,
                "unknown status '{value}' (expected draft, planned, in_progress, completed or cancelled)"
            ),
            ParseError::UnknownGranularity(value) => write!(
                f,
                "unknown view '{value}' (expected week, month or year)"
            ),
            ParseError::InvalidTime(value) => write!(f, "invalid time '{value}' (expected HH:MM)"),
            ParseError::InvalidDate(value) => {
                write!(f, "invalid date '{value}' (expected YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A window that cannot be built inside chrono's date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    DateOutOfRange {
        date: NaiveDate,
        granularity: Granularity,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::DateOutOfRange { date, granularity } => write!(
                f,
                "no {granularity} window around {date} fits the supported date range"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::booking::{Booking, BookingStatus, StatusFilter};
use crate::calendar;
use crate::resource::{Resource, RowKey};

use super::window::ViewWindow;

/// A booking mapped onto board columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectedBooking {
    pub booking_id: String,
    pub row: RowKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: BookingStatus,
    #[serde(default, with = "crate::booking::hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    pub column_start: usize,
    /// Number of columns covered, at least one.
    pub span: usize,
    /// Stacking slot inside the row, filled in by the lane assigner.
    pub lane: usize,
    /// The booking starts before the window.
    pub clipped_start: bool,
    /// The booking ends after the window.
    pub clipped_end: bool,
}

impl ProjectedBooking {
    /// Exclusive column end.
    pub fn column_end(&self) -> usize {
        self.column_start + self.span
    }

    pub fn overlaps(&self, other: &ProjectedBooking) -> bool {
        self.column_start < other.column_end() && other.column_start < self.column_end()
    }
}

/// Bookings of one row, in projection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub key: RowKey,
    pub bookings: Vec<ProjectedBooking>,
}

pub struct IntervalProjector<'a> {
    window: &'a ViewWindow,
    statuses: &'a StatusFilter,
    known_resources: HashSet<&'a str>,
}

impl<'a> IntervalProjector<'a> {
    pub fn new(window: &'a ViewWindow, statuses: &'a StatusFilter, resources: &'a [Resource]) -> Self {
        Self {
            window,
            statuses,
            known_resources: resources.iter().map(|r| r.id.as_str()).collect(),
        }
    }

    /// Project every visible booking. Rejected bookings are skipped.
    pub fn project(&self, bookings: &[Booking]) -> Vec<ProjectedBooking> {
        let projected: Vec<ProjectedBooking> = bookings
            .iter()
            .filter_map(|booking| self.project_one(booking))
            .collect();
        tracing::debug!(
            window_start = %self.window.start,
            window_end = %self.window.end,
            total = bookings.len(),
            visible = projected.len(),
            "projected bookings onto window"
        );
        projected
    }

    pub fn project_one(&self, booking: &Booking) -> Option<ProjectedBooking> {
        if !self.statuses.allows(booking.status) {
            return None;
        }
        let Some((start, end)) = booking.date_range() else {
            tracing::trace!(booking = %booking.id, "booking has no dates, skipped");
            return None;
        };
        if booking.is_inverted() {
            tracing::warn!(
                booking = %booking.id,
                "booking ends before it starts, drawing it on its start day"
            );
        }
        if end < self.window.start || start > self.window.end {
            return None;
        }

        let visible_start = start.max(self.window.start);
        let visible_end = end.min(self.window.end);
        let (column_start, span) = self.columns_for(visible_start, visible_end)?;

        Some(ProjectedBooking {
            booking_id: booking.id.clone(),
            row: self.row_for(booking),
            title: booking.title.clone(),
            status: booking.status,
            start_time: booking.start_time,
            column_start,
            span,
            lane: 0,
            clipped_start: start < self.window.start,
            clipped_end: end > self.window.end,
        })
    }

    fn columns_for(&self, visible_start: NaiveDate, visible_end: NaiveDate) -> Option<(usize, usize)> {
        let column_count = self.window.column_count();
        if column_count == 0 {
            return None;
        }
        let (offset, width) = if self.window.granularity.is_day_based() {
            (
                calendar::days_between(self.window.start, visible_start),
                calendar::days_between(visible_start, visible_end) + 1,
            )
        } else {
            (
                calendar::months_between(self.window.start, visible_start),
                calendar::months_between(visible_start, visible_end) + 1,
            )
        };

        let column_start = usize::try_from(offset.max(0)).unwrap_or(0).min(column_count - 1);
        let span = usize::try_from(width.max(1))
            .unwrap_or(1)
            .min(column_count - column_start);
        Some((column_start, span))
    }

    fn row_for(&self, booking: &Booking) -> RowKey {
        match booking.resource_id.as_deref() {
            Some(id) if self.known_resources.contains(id) => RowKey::Resource(id.to_string()),
            Some(id) => {
                tracing::warn!(booking = %booking.id, resource = id, "unknown resource, booking moved to unassigned row");
                RowKey::Unassigned
            }
            None => RowKey::Unassigned,
        }
    }
}

/// Split projected bookings into rows: one per resource in list order, then
/// the unassigned row. Rows without bookings are kept for resources and
/// omitted for the unassigned bucket.
pub fn group_by_row(projected: Vec<ProjectedBooking>, resources: &[Resource]) -> Vec<RowGroup> {
    let mut buckets: HashMap<RowKey, Vec<ProjectedBooking>> = HashMap::new();
    for booking in projected {
        buckets.entry(booking.row.clone()).or_default().push(booking);
    }

    let mut rows: Vec<RowGroup> = Vec::with_capacity(resources.len() + 1);
    let mut seen: HashSet<&str> = HashSet::with_capacity(resources.len());
    for resource in resources {
        if !seen.insert(resource.id.as_str()) {
            continue;
        }
        let key = RowKey::Resource(resource.id.clone());
        let bookings = buckets.remove(&key).unwrap_or_default();
        rows.push(RowGroup { key, bookings });
    }
    if let Some(bookings) = buckets.remove(&RowKey::Unassigned) {
        rows.push(RowGroup {
            key: RowKey::Unassigned,
            bookings,
        });
    }
    rows
}

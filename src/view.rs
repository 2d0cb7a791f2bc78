use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::board::BoardQuery;
use crate::booking::{BookingStatus, StatusFilter};
use crate::error::LayoutError;
use crate::layout::{Granularity, ViewWindow, shift_reference};

/// Viewer-side navigation state. Every change is followed by a fresh layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub reference_date: NaiveDate,
    pub granularity: Granularity,
    pub statuses: StatusFilter,
}

impl BoardView {
    pub fn new(reference_date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            reference_date,
            granularity,
            statuses: StatusFilter::default(),
        }
    }

    pub fn with_statuses(mut self, statuses: StatusFilter) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn window(&self) -> Result<ViewWindow, LayoutError> {
        ViewWindow::resolve(self.reference_date, self.granularity)
    }

    pub fn next(&mut self) -> Result<ViewWindow, LayoutError> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Result<ViewWindow, LayoutError> {
        self.step(-1)
    }

    pub fn today(&mut self, today: NaiveDate) -> Result<ViewWindow, LayoutError> {
        self.move_to(today, self.granularity)
    }

    pub fn goto(&mut self, date: NaiveDate) -> Result<ViewWindow, LayoutError> {
        self.move_to(date, self.granularity)
    }

    /// Keeps the reference date; only the zoom level changes.
    pub fn set_granularity(&mut self, granularity: Granularity) -> Result<ViewWindow, LayoutError> {
        self.move_to(self.reference_date, granularity)
    }

    fn step(&mut self, steps: i32) -> Result<ViewWindow, LayoutError> {
        let reference = shift_reference(self.reference_date, self.granularity, steps).ok_or(
            LayoutError::DateOutOfRange {
                date: self.reference_date,
                granularity: self.granularity,
            },
        )?;
        self.move_to(reference, self.granularity)
    }

    /// The view only changes when the new window can be resolved.
    fn move_to(
        &mut self,
        reference: NaiveDate,
        granularity: Granularity,
    ) -> Result<ViewWindow, LayoutError> {
        let window = ViewWindow::resolve(reference, granularity)?;
        self.reference_date = reference;
        self.granularity = granularity;
        Ok(window)
    }

    /// Returns whether the status is now shown.
    pub fn toggle_status(&mut self, status: BookingStatus) -> bool {
        self.statuses.toggle(status)
    }

    pub fn set_status(&mut self, status: BookingStatus, enabled: bool) {
        if enabled {
            self.statuses.enable(status);
        } else {
            self.statuses.disable(status);
        }
    }

    pub fn query(&self, today: NaiveDate) -> BoardQuery {
        BoardQuery {
            reference_date: self.reference_date,
            granularity: self.granularity,
            statuses: self.statuses.clone(),
            today,
        }
    }
}

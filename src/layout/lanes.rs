use chrono::NaiveTime;

use super::projection::ProjectedBooking;

/// Greedy interval partitioning of one row's bookings into stacking lanes.
///
/// Bookings are ordered by `(column_start, start_time, booking_id)` and each
/// one goes into the lowest lane that is free at its first column. With that
/// ordering the lane count equals the peak number of overlapping bookings.
#[derive(Debug, Default)]
pub struct LaneAssigner {
    lanes: Vec<Vec<ProjectedBooking>>,
    /// Exclusive column end of the last booking in each lane.
    lane_ends: Vec<usize>,
}

impl LaneAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the bookings and return them grouped by lane, each carrying its lane index.
    pub fn assign(mut self, mut bookings: Vec<ProjectedBooking>) -> Vec<Vec<ProjectedBooking>> {
        for booking in &mut bookings {
            booking.span = booking.span.max(1);
        }
        sort_for_stacking(&mut bookings);

        for booking in bookings {
            self.place(booking);
        }
        self.lanes
    }

    fn place(&mut self, mut booking: ProjectedBooking) {
        // Input is sorted by start column, so a lane is free for the candidate
        // exactly when its last booking ends at or before the candidate starts.
        let free_lane = self
            .lane_ends
            .iter()
            .position(|end| *end <= booking.column_start);

        let lane = match free_lane {
            Some(lane) => lane,
            None => {
                self.lanes.push(Vec::new());
                self.lane_ends.push(0);
                self.lanes.len() - 1
            }
        };

        booking.lane = lane;
        self.lane_ends[lane] = booking.column_end();
        self.lanes[lane].push(booking);
    }
}

/// Deterministic stacking order: start column, then start time (unset counts
/// as midnight), then booking id.
pub fn sort_for_stacking(bookings: &mut [ProjectedBooking]) {
    bookings.sort_by(|a, b| {
        a.column_start
            .cmp(&b.column_start)
            .then_with(|| {
                a.start_time
                    .unwrap_or(NaiveTime::MIN)
                    .cmp(&b.start_time.unwrap_or(NaiveTime::MIN))
            })
            .then_with(|| a.booking_id.cmp(&b.booking_id))
    });
}

/// Assign lanes for a single row.
pub fn assign_lanes(bookings: Vec<ProjectedBooking>) -> Vec<Vec<ProjectedBooking>> {
    LaneAssigner::new().assign(bookings)
}

/// Peak number of bookings covering any single column, computed with a sweep
/// line independent of lane assignment.
pub fn max_overlap(bookings: &[ProjectedBooking]) -> usize {
    let mut events: Vec<(usize, i32)> = Vec::with_capacity(bookings.len() * 2);
    for booking in bookings {
        let span = booking.span.max(1);
        events.push((booking.column_start, 1));
        events.push((booking.column_start + span, -1));
    }
    // Ends sort before starts on the same column since ranges are half open.
    events.sort_unstable();

    let mut current: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        current += i64::from(delta);
        peak = peak.max(current);
    }
    usize::try_from(peak).unwrap_or(0)
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::booking::{Booking, StatusFilter};
use crate::config::BoardConfig;
use crate::error::LayoutError;
use crate::layout::{
    ColorAssignment, Granularity, IntervalProjector, ProjectedBooking, RowColor, ViewWindow,
    assign_lanes, group_by_row, today_marker,
};
use crate::resource::{Resource, RowKey};

/// Everything the viewer controls: where the board looks and what it shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardQuery {
    pub reference_date: NaiveDate,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub statuses: StatusFilter,
    pub today: NaiveDate,
}

impl BoardQuery {
    pub fn new(reference_date: NaiveDate, granularity: Granularity, today: NaiveDate) -> Self {
        Self {
            reference_date,
            granularity,
            statuses: StatusFilter::default(),
            today,
        }
    }

    pub fn with_statuses(mut self, statuses: StatusFilter) -> Self {
        self.statuses = statuses;
        self
    }
}

/// A projected booking plus the color of its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBooking {
    #[serde(flatten)]
    pub projection: ProjectedBooking,
    pub color: RowColor,
    pub color_hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub key: RowKey,
    pub label: String,
    pub color: RowColor,
    pub color_hex: String,
    /// Lane 0 first; every lane holds bookings with disjoint column ranges.
    pub lanes: Vec<Vec<PlacedBooking>>,
}

impl BoardRow {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn bookings(&self) -> impl Iterator<Item = &PlacedBooking> {
        self.lanes.iter().flatten()
    }
}

/// Renderer-ready output of one pass through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub window: ViewWindow,
    pub rows: Vec<BoardRow>,
    pub today_marker: Option<f64>,
}

impl BoardLayout {
    pub fn row(&self, key: &RowKey) -> Option<&BoardRow> {
        self.rows.iter().find(|row| &row.key == key)
    }

    pub fn find_booking(&self, booking_id: &str) -> Option<&PlacedBooking> {
        self.rows
            .iter()
            .flat_map(BoardRow::bookings)
            .find(|placed| placed.projection.booking_id == booking_id)
    }

    pub fn booking_count(&self) -> usize {
        self.rows.iter().map(|row| row.bookings().count()).sum()
    }
}

/// Run the full layout pipeline. Resources keep the order they are given in.
///
/// Fails only when the window around the reference date leaves chrono's
/// date range.
pub fn compute_layout(
    bookings: &[Booking],
    resources: &[Resource],
    query: &BoardQuery,
    config: &BoardConfig,
) -> Result<BoardLayout, LayoutError> {
    let window = ViewWindow::resolve(query.reference_date, query.granularity)?;
    let projected = IntervalProjector::new(&window, &query.statuses, resources).project(bookings);
    let colors = ColorAssignment::new(resources, config.palette_size());

    let rows = group_by_row(projected, resources)
        .into_iter()
        .map(|group| {
            let color = colors.color_for(&group.key);
            let color_hex = config.color_hex(color).to_string();
            let label = match &group.key {
                RowKey::Resource(id) => resources
                    .iter()
                    .find(|r| &r.id == id)
                    .map(|r| r.display_name.clone())
                    .unwrap_or_else(|| id.clone()),
                RowKey::Unassigned => config.unassigned_label.clone(),
            };
            let lanes: Vec<Vec<PlacedBooking>> = assign_lanes(group.bookings)
                .into_iter()
                .map(|lane| {
                    lane.into_iter()
                        .map(|projection| PlacedBooking {
                            projection,
                            color,
                            color_hex: color_hex.clone(),
                        })
                        .collect()
                })
                .collect();
            tracing::trace!(row = %group.key, lanes = lanes.len(), "stacked row");
            BoardRow {
                key: group.key,
                label,
                color,
                color_hex,
                lanes,
            }
        })
        .collect::<Vec<_>>();

    let marker = today_marker(&window, query.today);
    tracing::debug!(
        granularity = %query.granularity,
        reference = %query.reference_date,
        rows = rows.len(),
        "computed board layout"
    );
    Ok(BoardLayout {
        window,
        rows,
        today_marker: marker,
    })
}

#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    bookings: Vec<Booking>,
    resources: Vec<Resource>,
    query: BoardQuery,
    config: BoardConfig,
}

impl LayoutKey {
    fn matches(
        &self,
        bookings: &[Booking],
        resources: &[Resource],
        query: &BoardQuery,
        config: &BoardConfig,
    ) -> bool {
        self.query == *query
            && self.config == *config
            && self.resources == resources
            && self.bookings == bookings
    }
}

/// Single-entry memo of the last computed layout.
///
/// The key is the complete input: bookings, resources, query (reference date,
/// granularity, status filter, today) and configuration.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(LayoutKey, Arc<BoardLayout>)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        bookings: &[Booking],
        resources: &[Resource],
        query: &BoardQuery,
        config: &BoardConfig,
    ) -> Result<Arc<BoardLayout>, LayoutError> {
        if let Some((key, layout)) = &self.entry {
            if key.matches(bookings, resources, query, config) {
                self.hits += 1;
                return Ok(Arc::clone(layout));
            }
        }

        self.misses += 1;
        let layout = Arc::new(compute_layout(bookings, resources, query, config)?);
        let key = LayoutKey {
            bookings: bookings.to_vec(),
            resources: resources.to_vec(),
            query: query.clone(),
            config: config.clone(),
        };
        self.entry = Some((key, Arc::clone(&layout)));
        Ok(layout)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

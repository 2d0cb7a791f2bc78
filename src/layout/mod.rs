//! Pure layout stages of the planning board: window resolution, projection
//! onto columns, lane stacking, row colors, the today line and tooltip
//! placement.

pub mod colors;
pub mod lanes;
pub mod projection;
pub mod today;
pub mod tooltip;
pub mod window;

pub use colors::{ColorAssignment, RowColor};
pub use lanes::{LaneAssigner, assign_lanes, max_overlap, sort_for_stacking};
pub use projection::{IntervalProjector, ProjectedBooking, RowGroup, group_by_row};
pub use today::today_marker;
pub use tooltip::{AnchorRect, TooltipGeometry, TooltipPlacement, TooltipPosition, position_tooltip};
pub use window::{ColumnKey, Granularity, ViewWindow, shift_reference};

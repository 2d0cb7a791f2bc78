pub mod board;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod layout;
pub mod persistence;
pub mod resource;
pub mod validation;
pub mod view;

pub use board::{BoardLayout, BoardQuery, BoardRow, LayoutCache, PlacedBooking, compute_layout};
pub use booking::{Booking, BookingStatus, StatusFilter};
pub use config::{BoardConfig, ConfigError};
pub use error::{LayoutError, ParseError};
pub use layout::{
    AnchorRect, ColorAssignment, ColumnKey, Granularity, ProjectedBooking, RowColor,
    TooltipGeometry, TooltipPosition, ViewWindow, position_tooltip, today_marker,
};
pub use persistence::{
    BoardDataset, CsvDataset, DatasetSource, JsonDataset, PersistenceError, load_bookings_from_csv,
    load_dataset_from_json, load_resources_from_csv, save_dataset_to_json, save_layout_to_json,
};
pub use resource::{Resource, RowKey, sort_resources};
pub use validation::ValidationError;
pub use view::BoardView;

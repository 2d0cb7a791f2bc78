use serde::{Deserialize, Serialize};
use std::fmt;

/// A trainer, i.e. one row of the planning board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier referenced by `Booking::resource_id`.
    pub id: String,
    pub display_name: String,
    /// Externally maintained ordering key. Empty keys sort before any other.
    #[serde(default)]
    pub sort_key: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            sort_key: display_name.to_lowercase(),
            display_name,
        }
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = sort_key.into();
        self
    }
}

/// Order resources by `(sort_key, display_name, id)`.
///
/// Only needed when the source delivers rows without an order of its own; the
/// board otherwise keeps the order it is given.
pub fn sort_resources(resources: &mut [Resource]) {
    resources.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Row a booking is laid out in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RowKey {
    Resource(String),
    /// Bookings without a resource, or pointing at one that is not in the list.
    Unassigned,
}

impl RowKey {
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            RowKey::Resource(id) => Some(id),
            RowKey::Unassigned => None,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Resource(id) => f.write_str(id),
            RowKey::Unassigned => f.write_str("unassigned"),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::resource::{Resource, RowKey};

/// Color slot of a board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum RowColor {
    Palette(usize),
    /// Fixed color outside the palette, reserved for the unassigned row.
    Unassigned,
}

/// Maps resources to palette slots by their position in the resource list.
/// Bookings play no part, so colors stay put while the data changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAssignment {
    by_resource: HashMap<String, usize>,
    palette_size: usize,
}

impl ColorAssignment {
    /// A zero `palette_size` is treated as a single-color palette.
    pub fn new(resources: &[Resource], palette_size: usize) -> Self {
        let palette_size = palette_size.max(1);
        let mut by_resource = HashMap::with_capacity(resources.len());
        for (index, resource) in resources.iter().enumerate() {
            by_resource
                .entry(resource.id.clone())
                .or_insert(index % palette_size);
        }
        Self {
            by_resource,
            palette_size,
        }
    }

    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Palette slot of a known resource.
    pub fn index_of(&self, resource_id: &str) -> Option<usize> {
        self.by_resource.get(resource_id).copied()
    }

    pub fn color_for(&self, row: &RowKey) -> RowColor {
        match row {
            RowKey::Resource(id) => self
                .index_of(id)
                .map(RowColor::Palette)
                .unwrap_or(RowColor::Unassigned),
            RowKey::Unassigned => RowColor::Unassigned,
        }
    }
}

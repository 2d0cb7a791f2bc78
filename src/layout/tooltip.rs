use serde::{Deserialize, Serialize};

/// Bounding box of the hovered bar, relative to the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Size of the tooltip overlay and the spacing kept around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipGeometry {
    pub width: f64,
    pub height: f64,
    /// Minimum distance to the container's left and right edges.
    pub min_margin: f64,
    /// Vertical distance between the tooltip and the anchor.
    pub gap: f64,
}

impl Default for TooltipGeometry {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 140.0,
            min_margin: 8.0,
            gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipPlacement {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub x: f64,
    pub y: f64,
    pub placement: TooltipPlacement,
}

/// Place the tooltip centered over the anchor, clamped horizontally into the
/// container. It flips below the anchor when there is no room above.
pub fn position_tooltip(
    anchor: AnchorRect,
    container_width: f64,
    geometry: TooltipGeometry,
) -> TooltipPosition {
    let margin = geometry.min_margin.max(0.0);
    let centered = anchor.x + anchor.width / 2.0 - geometry.width / 2.0;
    let max_x = container_width - geometry.width - margin;
    let x = if max_x < margin || !max_x.is_finite() {
        margin
    } else {
        centered.clamp(margin, max_x)
    };

    let above = anchor.y - geometry.height - geometry.gap;
    let (y, placement) = if above >= 0.0 {
        (above, TooltipPlacement::Above)
    } else {
        (anchor.y + anchor.height + geometry.gap, TooltipPlacement::Below)
    };

    TooltipPosition { x, y, placement }
}

// Card layout - where each card sits and which slice of the background it shows
//
// All positions are percentages of the cards container. Radii and border
// widths are in container-query width units of a single card.

use crate::config::{CardCell, GridConfig};
use crate::grid::resolver::ViewportSize;
use serde::{Deserialize, Serialize};

const BORDER_SIZE_COEFFICIENT: f64 = 1.0;

/// Styling passthrough for the cards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub border_radius: f64,
    pub border_color: String,
    pub border_width: f64,
    pub overlay_text: Option<String>,
    pub overlay_text_size: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border_radius: 8.0,
            border_color: "#ffffff".to_string(),
            border_width: 2.0,
            overlay_text: None,
            overlay_text_size: 50.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub cell: CardCell,
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
    /// `background-size` of the card, (x, y)
    pub background_size_pct: (f64, f64),
    /// `background-position` of the card, (x, y)
    pub background_position_pct: (f64, f64),
    /// Radius that clips the card itself
    pub corner_radius: f64,
    /// Radius of the drawn border
    pub border_radius: f64,
    pub border_width: f64,
}

pub fn card_geometry(cell: CardCell, grid: GridConfig, style: &CardStyle) -> CardGeometry {
    let rows = grid.rows as f64;
    let cols = grid.cols as f64;
    let row = cell.row as f64;
    let col = cell.col as f64;

    CardGeometry {
        cell,
        left_pct: col / cols * 100.0,
        top_pct: row / rows * 100.0,
        width_pct: 100.0 / cols,
        height_pct: 100.0 / rows,
        background_size_pct: (cols * 100.0, rows * 100.0),
        background_position_pct: (col * -100.0, row * -100.0),
        corner_radius: style.border_radius * BORDER_SIZE_COEFFICIENT / (rows * 2.0),
        border_radius: style.border_radius * BORDER_SIZE_COEFFICIENT,
        border_width: style.border_width * BORDER_SIZE_COEFFICIENT,
    }
}

/// Geometry of every card, row-major
pub fn grid_geometry(grid: GridConfig, style: &CardStyle) -> Vec<CardGeometry> {
    grid.cells().map(|cell| card_geometry(cell, grid, style)).collect()
}

/// Scale applied to the cards container so that an image of `aspect_ratio`
/// covers a viewport narrower than the image. Returns 1.0 when no scaling is
/// needed or the viewport is empty.
pub fn container_scale(viewport: ViewportSize, aspect_ratio: f64) -> f64 {
    match viewport.ratio() {
        Some(ratio) if viewport.width > 0.0 && ratio < aspect_ratio => {
            viewport.height * aspect_ratio / viewport.width
        }
        _ => 1.0,
    }
}

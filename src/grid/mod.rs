// Grid module - grid sizing, per-card delays and card geometry

pub mod delay;
pub mod layout;
pub mod resolver;

// Re-export the main grid types for easy access
pub use delay::{
    anchor_cell, calculate_delay, compute_cells, AnimationPattern, CellDelay, Delay,
};
pub use layout::{card_geometry, container_scale, grid_geometry, CardGeometry, CardStyle};
pub use resolver::{resolve_grid, GridResolver, ViewportSize, DEFAULT_GRID};

// Re-export common types used by all grid code
pub use crate::config::{CardCell, GridConfig, GridDimensions};

// Configuration - grid dimensions and the full set of reveal options

pub mod grid_config;
pub mod reveal_config;

pub use grid_config::{CardCell, GridConfig, GridDimensions};
pub use reveal_config::{CardSize, RevealConfig};

// E-Reveal: staged card-grid reveal scheduling
// Computes per-card delays for a tiled background reveal and drives the
// initial -> reveal -> done stage machine a rendering host plays back

// Modular structure
pub mod config;
pub mod display;
pub mod grid;
pub mod host;
pub mod reveal;

// Import our error handling module
pub mod reveal_errors;
pub use reveal_errors::{validate_coordinates, RevealError, RevealResult};

// Re-export main types for convenience
pub use config::{CardCell, CardSize, GridConfig, GridDimensions, RevealConfig};
pub use grid::{
    anchor_cell, calculate_delay, card_geometry, compute_cells, container_scale, grid_geometry,
    resolve_grid, AnimationPattern, CardGeometry, CardStyle, CellDelay, Delay, GridResolver,
    ViewportSize, DEFAULT_GRID,
};
pub use host::{
    resolve_aspect_ratio, FinishEvent, FixedViewport, ImageMetrics, SharedViewport,
    SimulatedHost, StaticImageMetrics, Subscription, ViewportCallback, ViewportProvider,
    DEFAULT_IMAGE_ASPECT_RATIO,
};
pub use reveal::{
    cards_to_done, completion_index, CellTransition, EasingType, FrameLayout, ListenerId, NotifyOutcome, Playback,
    RevealEvent, RevealScheduler, Stage,
};

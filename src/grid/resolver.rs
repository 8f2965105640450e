// Grid resolver - turns explicit sizes or a target card size into grid dimensions

use crate::config::{CardSize, GridConfig};
use crate::host::ViewportProvider;
use serde::{Deserialize, Serialize};

/// Fallback grid when neither a card size nor an explicit grid is configured
pub const DEFAULT_GRID: GridConfig = GridConfig { rows: 4, cols: 4 };

/// Viewport size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` for an empty viewport
    pub fn ratio(&self) -> Option<f64> {
        if self.height > 0.0 && self.width.is_finite() && self.height.is_finite() {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// Number of cards of `card` pixels needed to cover `extent` pixels, at least 1
fn cover_count(extent: f64, card: f64) -> usize {
    let count = (extent / card).ceil();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Resolve the active grid.
///
/// A card size wins over an explicit grid: the grid is then sized so that it
/// fully covers the viewport, letting the last row/column overhang.
pub fn resolve_grid(
    explicit_grid: Option<GridConfig>,
    card_size: Option<CardSize>,
    viewport: ViewportSize,
) -> GridConfig {
    if let Some(card) = card_size {
        return GridConfig::new(
            cover_count(viewport.height, card.height),
            cover_count(viewport.width, card.width),
        );
    }
    explicit_grid.map(GridConfig::clamped).unwrap_or(DEFAULT_GRID)
}

/// Grid sizing inputs, resolved against a viewport on demand
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridResolver {
    pub explicit_grid: Option<GridConfig>,
    pub card_size: Option<CardSize>,
}

impl GridResolver {
    pub fn new(explicit_grid: Option<GridConfig>, card_size: Option<CardSize>) -> Self {
        Self {
            explicit_grid,
            card_size,
        }
    }

    /// True when the result depends on the viewport size
    pub fn tracks_viewport(&self) -> bool {
        self.card_size.is_some()
    }

    pub fn resolve(&self, viewport: ViewportSize) -> GridConfig {
        resolve_grid(self.explicit_grid, self.card_size, viewport)
    }

    /// Resolve against the provider's current viewport size
    pub fn resolve_with(&self, viewport: &dyn ViewportProvider) -> GridConfig {
        self.resolve(viewport.current_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SharedViewport;

    #[test]
    fn test_card_size_covers_viewport() {
        let card = Some(CardSize::new(100.0, 150.0));
        let grid = resolve_grid(None, card, ViewportSize::new(800.0, 600.0));
        assert_eq!(grid.cols, 8);
        assert_eq!(grid.rows, 4);

        let overhang = resolve_grid(None, card, ViewportSize::new(801.0, 600.0));
        assert_eq!(overhang.cols, 9);
        assert_eq!(overhang.rows, 4);
    }

    #[test]
    fn test_card_size_beats_explicit_grid() {
        let grid = resolve_grid(
            Some(GridConfig::new(2, 2)),
            Some(CardSize::new(200.0, 200.0)),
            ViewportSize::new(1000.0, 500.0),
        );
        assert_eq!(grid, GridConfig::new(3, 5));
    }

    #[test]
    fn test_explicit_and_default_grid() {
        let viewport = ViewportSize::new(1920.0, 1080.0);
        assert_eq!(resolve_grid(Some(GridConfig::new(3, 9)), None, viewport), GridConfig::new(3, 9));
        assert_eq!(resolve_grid(None, None, viewport), DEFAULT_GRID);
    }

    #[test]
    fn test_degenerate_inputs_clamp_to_one() {
        let card = Some(CardSize::new(100.0, 100.0));
        assert_eq!(resolve_grid(None, card, ViewportSize::new(0.0, 0.0)), GridConfig::new(1, 1));
        assert_eq!(resolve_grid(None, card, ViewportSize::new(-50.0, 250.0)), GridConfig::new(3, 1));
        assert_eq!(
            resolve_grid(None, Some(CardSize::new(0.0, 0.0)), ViewportSize::new(800.0, 600.0)),
            GridConfig::new(1, 1)
        );
        assert_eq!(
            resolve_grid(Some(GridConfig { rows: 0, cols: 3 }), None, ViewportSize::default()),
            GridConfig::new(1, 3)
        );
    }

    #[test]
    fn test_resolve_with_provider() {
        let viewport = SharedViewport::new(ViewportSize::new(400.0, 300.0));
        let resolver = GridResolver::new(None, Some(CardSize::new(100.0, 100.0)));
        assert!(resolver.tracks_viewport());
        assert_eq!(resolver.resolve_with(&viewport), GridConfig::new(3, 4));

        viewport.set_size(ViewportSize::new(250.0, 300.0));
        assert_eq!(resolver.resolve_with(&viewport), GridConfig::new(3, 3));
    }
}
